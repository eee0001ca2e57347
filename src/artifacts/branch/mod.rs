pub mod branch_name;

/// Names that cannot live as a plain file under `branches/`
pub const INVALID_BRANCH_NAME_REGEX: &str =
    r"^\.|\.\.|\.lock$|@\{|[\x00-\x20\*:\?\[\\~\^/\x7f]";
