/// Maximum length for participant email fields
pub const MAX_EMAIL_LENGTH: usize = 255;
