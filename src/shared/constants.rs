/// Maximum length of a stored image path (VARCHAR(255))
pub const IMAGE_PATH_MAX_LENGTH: u64 = 255;
