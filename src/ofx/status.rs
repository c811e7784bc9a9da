use std::fmt;

/// Status code returned through the plugin's main entry point.
///
/// Plugins may return any integer, so this is an open newtype rather than a
/// closed enum. The well known codes are associated constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Status(pub i32);

impl Status {
    pub const OK: Status = Status(0);
    pub const FAILED: Status = Status(1);
    pub const ERR_FATAL: Status = Status(2);
    pub const ERR_UNKNOWN: Status = Status(3);
    pub const ERR_MISSING_HOST_FEATURE: Status = Status(4);
    pub const ERR_UNSUPPORTED: Status = Status(5);
    pub const ERR_EXISTS: Status = Status(6);
    pub const ERR_FORMAT: Status = Status(7);
    pub const ERR_MEMORY: Status = Status(8);
    pub const ERR_BAD_HANDLE: Status = Status(9);
    pub const ERR_BAD_INDEX: Status = Status(10);
    pub const ERR_VALUE: Status = Status(11);
    pub const REPLY_YES: Status = Status(12);
    pub const REPLY_NO: Status = Status(13);
    pub const REPLY_DEFAULT: Status = Status(14);

    /// Raw code for the C boundary
    pub fn code(self) -> i32 {
        self.0
    }

    /// Whether this is `kOfxStatOK`
    pub fn is_ok(self) -> bool {
        self == Self::OK
    }

    /// Symbolic name as spelled in the OpenFX headers
    pub fn name(self) -> &'static str {
        match self.0 {
            0 => "kOfxStatOK",
            1 => "kOfxStatFailed",
            2 => "kOfxStatErrFatal",
            3 => "kOfxStatErrUnknown",
            4 => "kOfxStatErrMissingHostFeature",
            5 => "kOfxStatErrUnsupported",
            6 => "kOfxStatErrExists",
            7 => "kOfxStatErrFormat",
            8 => "kOfxStatErrMemory",
            9 => "kOfxStatErrBadHandle",
            10 => "kOfxStatErrBadIndex",
            11 => "kOfxStatErrValue",
            12 => "kOfxStatReplyYes",
            13 => "kOfxStatReplyNo",
            14 => "kOfxStatReplyDefault",
            _ => "unknown status",
        }
    }
}

impl From<i32> for Status {
    fn from(code: i32) -> Self {
        Status(code)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.0)
    }
}
