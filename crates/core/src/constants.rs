/// Constants used throughout the flowenv codebase
// Encrypted token framing
pub const ENCRYPTED_TOKEN_PREFIX: &str = "ENC(";
pub const ENCRYPTED_TOKEN_SUFFIX: &str = ")";

// Key file naming
pub const PRIVATE_KEY_SUFFIX: &str = "-private.pem";
pub const PUBLIC_KEY_SUFFIX: &str = "-public.pem";

// PEM armor labels
pub const PRIVATE_KEY_LABEL: &str = "FLOWENV PRIVATE KEY";
pub const PUBLIC_KEY_LABEL: &str = "FLOWENV PUBLIC KEY";

// Suffix inserted before the extension of file-mode ciphertext output
pub const ENCRYPTED_FILE_SUFFIX: &str = "-encrypted";

// Environment variable names
pub const FLOWENV_LOG_VAR: &str = "FLOWENV_LOG";

// Shell used to run workflow steps
pub const DEFAULT_SHELL: &str = "sh";
