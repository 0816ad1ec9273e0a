pub mod branch_name;

/// Names matching this pattern are rejected (git-style reference rules)
pub const INVALID_BRANCH_NAME_REGEX: &str =
    r"^\.|\/\.|\.\.|^\/|\/$|\.lock$|@\{|[\x00-\x20\*:\?\[\\~\^\x7f]";

/// Prefix of the symbolic reference stored in `refs/head`
pub const BRANCH_REF_PREFIX: &str = "refs/branches/";
