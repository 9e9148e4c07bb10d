//! Catálogo de roles
//!
//! Textos de la pantalla de selección de rol, servidos por la API para que
//! los clientes no los dupliquen.

use serde::Serialize;

use crate::models::UserRole;

#[derive(Debug, Clone, Serialize)]
pub struct RoleOption {
    pub role: UserRole,
    pub title: &'static str,
    pub description: &'static str,
    pub features: [&'static str; 3],
    pub call_to_action: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoleCatalog {
    pub heading: &'static str,
    pub subheading: &'static str,
    pub roles: Vec<RoleOption>,
}

pub fn role_option(role: UserRole) -> RoleOption {
    match role {
        UserRole::Customer => RoleOption {
            role,
            title: "I Need Help",
            description: "Get roadside assistance from verified mechanics near you",
            features: [
                "Find mechanics nearby",
                "24/7 emergency service",
                "Professional assistance",
            ],
            call_to_action: "Continue as Customer",
        },
        UserRole::Mechanic => RoleOption {
            role,
            title: "I'm a Mechanic",
            description: "Join our network and help customers while earning money",
            features: ["Work in your area", "Flexible schedule", "Build your clientele"],
            call_to_action: "Join as Mechanic",
        },
    }
}

pub fn role_catalog() -> RoleCatalog {
    RoleCatalog {
        heading: "Choose Your Role",
        subheading: "Get started by selecting how you'd like to use FixItFast",
        roles: vec![role_option(UserRole::Customer), role_option(UserRole::Mechanic)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_lists_both_roles_in_order() {
        let catalog = role_catalog();
        let roles: Vec<_> = catalog.roles.iter().map(|r| r.role).collect();
        assert_eq!(roles, vec![UserRole::Customer, UserRole::Mechanic]);
        assert_eq!(catalog.roles[1].call_to_action, "Join as Mechanic");
    }
}
