//! User — identity record owned by the external user registry.
//!
//! Only existence matters to the rental saga; the remaining fields are
//! carried through untouched. Wire names follow the registry's contract.

use serde::{Deserialize, Serialize};

use crate::id::UserId;

/// A user record as returned by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub cpf: UserId,
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "telefone")]
    pub phone: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_registry_user_record() {
        let user: User = serde_json::from_str(
            r#"{"cpf": 7, "nome": "Maria", "email": "maria@example.com", "telefone": "+55 11 99999-0000"}"#,
        )
        .unwrap();
        assert_eq!(user.cpf, UserId::new(7));
        assert_eq!(user.name, "Maria");
    }
}
