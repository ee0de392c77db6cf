//! Domain constants
//!
//! Defaults for the harness settings and the names of the messages the
//! harness stubs on doubles.

// ============================================================================
// HARNESS DEFAULTS
// ============================================================================

/// Entity the current actor is a fixture of
pub const DEFAULT_ACTOR_MODEL: &str = "User";

/// Redirect target for requests that need a signed-in actor
pub const DEFAULT_LOGIN_PATH: &str = "/login";

/// Redirect target for requests that need an administrator
pub const DEFAULT_ADMIN_REDIRECT_PATH: &str = "/";

/// Opaque id injected for member actions when no fixture is prepared
pub const DEFAULT_PLACEHOLDER_ID: &str = "__id__";

/// Parameter carrying the actor id in `with_current_user` / `with_other_user`
pub const DEFAULT_ACTOR_PARAM: &str = "user_id";

/// First id handed out by the fixture sequence
pub const DEFAULT_FIRST_FIXTURE_ID: u64 = 1001;

// ============================================================================
// PARAMETER NAMES
// ============================================================================

/// Identifier parameter of member actions
pub const ID_PARAM: &str = "id";

// ============================================================================
// STUBBED MESSAGES
// ============================================================================

/// Lookup by id; raises when nothing matches
pub const FIND: &str = "find";

/// Lookup by id; answers nothing when nothing matches
pub const FIND_BY_ID: &str = "find_by_id";

/// Class-level constructor
pub const NEW: &str = "new";

/// Instance persistence
pub const SAVE: &str = "save";

/// Instance update
pub const UPDATE_ATTRIBUTES: &str = "update_attributes";

/// Instance removal
pub const DESTROY: &str = "destroy";

/// Paginated collection lookup
pub const PAGINATE: &str = "paginate";

/// Unpaginated collection lookup
pub const ALL: &str = "all";

/// Session persistence token attribute
pub const PERSISTENCE_TOKEN: &str = "persistence_token";

/// Single-use perishable token attribute
pub const PERISHABLE_TOKEN: &str = "perishable_token";
