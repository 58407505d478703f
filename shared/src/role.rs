use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Sender,
    Receiver,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn parses_lowercase_names() {
        assert_eq!(Role::from_str("sender"), Ok(Role::Sender));
        assert_eq!(Role::from_str("receiver"), Ok(Role::Receiver));
        assert!(Role::from_str("viewer").is_err());
        assert_eq!(Role::Receiver.to_string(), "receiver");
    }
}
