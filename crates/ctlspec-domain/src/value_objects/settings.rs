//! Harness settings

use crate::constants::{
    DEFAULT_ACTOR_MODEL, DEFAULT_ACTOR_PARAM, DEFAULT_ADMIN_REDIRECT_PATH,
    DEFAULT_FIRST_FIXTURE_ID, DEFAULT_LOGIN_PATH, DEFAULT_PLACEHOLDER_ID,
};
use serde::{Deserialize, Serialize};

/// Knobs of the harness, loaded as the `[harness]` configuration section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessSettings {
    /// Model the current actor is a fixture of
    pub actor_model: String,

    /// Redirect expected when no actor is signed in
    pub login_path: String,

    /// Redirect expected when the actor is not an administrator
    pub admin_redirect_path: String,

    /// Id injected into member actions when no fixture is prepared
    pub placeholder_id: String,

    /// Parameter carrying the actor id in `with_current_user`
    pub actor_param: String,

    /// First id of the per-example fixture sequence
    pub first_fixture_id: u64,
}

impl Default for HarnessSettings {
    fn default() -> Self {
        Self {
            actor_model: DEFAULT_ACTOR_MODEL.to_string(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            admin_redirect_path: DEFAULT_ADMIN_REDIRECT_PATH.to_string(),
            placeholder_id: DEFAULT_PLACEHOLDER_ID.to_string(),
            actor_param: DEFAULT_ACTOR_PARAM.to_string(),
            first_fixture_id: DEFAULT_FIRST_FIXTURE_ID,
        }
    }
}
