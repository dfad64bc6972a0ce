/// Literal scope name for the shared root (matched case-insensitively).
pub const SHARED_SCOPE: &str = "shared";

pub const SHARED_ROOT: &str = "/config/shared";

pub const DEVICE_GROUP_ROOT: &str =
    "/config/devices/entry[@name='localhost.localdomain']/device-group";

pub const DEFAULT_CONFIG_FILE: &str = "panw.cfg";
pub const DEFAULT_INPUT_FILE: &str = "objects.csv";

pub const REQUEST_TIMEOUT_SECS: u64 = 60;

pub const AUDIT_HEADER: [&str; 9] = [
    "timestamp",
    "object_name",
    "object_type",
    "src_scope",
    "dst_scope",
    "outcome",
    "message",
    "summary",
    "entry_xml",
];
