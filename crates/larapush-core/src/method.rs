//! Canonical operation table
//!
//! Every platform dialect is derived from this table: method names, parameter
//! order, failure codes, and which executor a call runs on all live here so the
//! Flutter and React Native adapters cannot drift apart.

use serde::{Deserialize, Serialize};

/// Host framework flavour of the bridge
///
/// The two dialects agree on everything except the failure code reported by
/// `areNotificationsEnabled` and the shape of call arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    /// Flutter method channel: keyed arguments, `notImplemented` for unknown methods
    #[default]
    Flutter,
    /// React Native native module: positional arguments, promise resolve/reject
    ReactNative,
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::Flutter => write!(f, "flutter"),
            Dialect::ReactNative => write!(f, "react_native"),
        }
    }
}

/// Operations exposed over the bridge channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Method {
    #[serde(rename = "initialize")]
    Initialize,
    #[serde(rename = "setTags")]
    SetTags,
    #[serde(rename = "removeTags")]
    RemoveTags,
    #[serde(rename = "clearTags")]
    ClearTags,
    #[serde(rename = "getTags")]
    GetTags,
    #[serde(rename = "getToken")]
    GetToken,
    #[serde(rename = "refreshToken")]
    RefreshToken,
    #[serde(rename = "areNotificationsEnabled")]
    AreNotificationsEnabled,
}

impl Method {
    /// Every operation in table order
    pub const ALL: [Method; 8] = [
        Method::Initialize,
        Method::SetTags,
        Method::RemoveTags,
        Method::ClearTags,
        Method::GetTags,
        Method::GetToken,
        Method::RefreshToken,
        Method::AreNotificationsEnabled,
    ];

    /// Wire name used on the channel
    pub fn name(&self) -> &'static str {
        match self {
            Method::Initialize => "initialize",
            Method::SetTags => "setTags",
            Method::RemoveTags => "removeTags",
            Method::ClearTags => "clearTags",
            Method::GetTags => "getTags",
            Method::GetToken => "getToken",
            Method::RefreshToken => "refreshToken",
            Method::AreNotificationsEnabled => "areNotificationsEnabled",
        }
    }

    /// Look up an operation by its wire name (exact, case-sensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.name() == name)
    }

    /// Failure code reported when the SDK raises during this operation
    pub fn failure_code(&self, dialect: Dialect) -> &'static str {
        match self {
            Method::Initialize => "INIT_ERROR",
            Method::SetTags => "SET_TAGS_ERROR",
            Method::RemoveTags => "REMOVE_TAGS_ERROR",
            Method::ClearTags => "CLEAR_TAGS_ERROR",
            Method::GetTags => "GET_TAGS_ERROR",
            Method::GetToken => "GET_TOKEN_ERROR",
            Method::RefreshToken => "REFRESH_TOKEN_ERROR",
            Method::AreNotificationsEnabled => match dialect {
                Dialect::Flutter => "NOTIFICATIONS_ENABLED_ERROR",
                Dialect::ReactNative => "NOTIFICATIONS_ERROR",
            },
        }
    }

    /// Ordered parameter names
    ///
    /// Positional dialects zip their argument list against this.
    pub fn params(&self) -> &'static [&'static str] {
        match self {
            Method::Initialize => &["panelUrl", "applicationId", "debug"],
            Method::SetTags | Method::RemoveTags => &["tags"],
            _ => &[],
        }
    }

    /// Whether the SDK call must run on the host main/UI thread
    pub fn runs_on_main_thread(&self) -> bool {
        matches!(
            self,
            Method::SetTags
                | Method::RemoveTags
                | Method::ClearTags
                | Method::GetToken
                | Method::RefreshToken
        )
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
