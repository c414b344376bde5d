use serde::Serialize;

/// Someone goals can be assigned to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: &'static str,
    pub username: &'static str,
    pub display_name: &'static str,
    pub initials: &'static str,
}

const PLACEHOLDER_USERS: [User; 2] = [
    User {
        id: "user1",
        username: "johndoe",
        display_name: "John Doe",
        initials: "JD",
    },
    User {
        id: "user2",
        username: "sarahm",
        display_name: "Sarah Miller",
        initials: "SM",
    },
];

/// Fixed assignee list; there is no account management
pub fn placeholder_users() -> &'static [User] {
    &PLACEHOLDER_USERS
}
