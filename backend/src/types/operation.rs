//! Account operations authorized through email verification

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Operation code outside the known range
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Unknown operation type: {0}")]
pub struct InvalidOperationType(pub u64);

/// Pending account operation a verification email authorizes
///
/// Serialized as its numeric code, which is also what the verification
/// token carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub enum OperationType {
    /// Bind an email address to the account
    BindEmail = 1,
    /// Unbind the email address from the account
    UnbindEmail = 2,
    /// Change the account password
    ChangePassword = 3,
}

impl OperationType {
    /// Numeric code of the operation
    #[must_use]
    pub const fn code(self) -> u64 {
        self as u64
    }

    /// Id of the notice template used for this operation
    ///
    /// Templates are stored one slot above the operation code:
    /// bind email uses 2, unbind email 3, change password 4.
    #[must_use]
    pub const fn notice_id(self) -> u64 {
        self.code() + 1
    }
}

impl TryFrom<u64> for OperationType {
    type Error = InvalidOperationType;

    fn try_from(code: u64) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::BindEmail),
            2 => Ok(Self::UnbindEmail),
            3 => Ok(Self::ChangePassword),
            other => Err(InvalidOperationType(other)),
        }
    }
}

impl From<OperationType> for u64 {
    fn from(operation: OperationType) -> Self {
        operation.code()
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BindEmail => "bind_email",
            Self::UnbindEmail => "unbind_email",
            Self::ChangePassword => "change_password",
        };
        f.write_str(name)
    }
}
