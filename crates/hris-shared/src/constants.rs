//! Application-wide constants

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Sibling ordering inside an object group starts at 1.
pub const FIRST_SORT_ORDER: i32 = 1;

/// How long a cached role access snapshot stays valid.
pub const ACCESS_CACHE_TTL_MINUTES: u64 = 15;

// Reference configuration keys for attendance windows (HH:MM values).
pub const REF_GROUP_ATTENDANCE: &str = "attendance";
pub const REF_KEY_CLOCK_IN_START: &str = "clock_in_start";
pub const REF_KEY_CLOCK_IN_END: &str = "clock_in_end";
pub const REF_KEY_WORK_START: &str = "work_start";
pub const REF_KEY_CLOCK_OUT_START: &str = "clock_out_start";

pub const DEFAULT_CLOCK_IN_START: &str = "06:00";
pub const DEFAULT_CLOCK_IN_END: &str = "10:00";
pub const DEFAULT_WORK_START: &str = "08:30";
pub const DEFAULT_CLOCK_OUT_START: &str = "16:00";
