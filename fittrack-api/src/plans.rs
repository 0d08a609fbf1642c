use serde::Serialize;

/// Subscription catalog shown on the premium screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: &'static str,
    pub name: &'static str,
    pub amount_cents: u32,
    pub currency: &'static str,
}

pub const PLANS: [Plan; 3] = [
    Plan {
        id: "monthly",
        name: "Monthly",
        amount_cents: 999,
        currency: "usd",
    },
    Plan {
        id: "6month",
        name: "6-Month Bundle",
        amount_cents: 4999,
        currency: "usd",
    },
    Plan {
        id: "annual",
        name: "Annual",
        amount_cents: 7999,
        currency: "usd",
    },
];

pub fn find(id: &str) -> Option<Plan> {
    PLANS.into_iter().find(|plan| plan.id == id)
}
