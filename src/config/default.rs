// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Default configuration values.

use super::schema::CgConfig;

/// Get the default configuration.
pub fn default_config() -> CgConfig {
    CgConfig::default()
}

/// Generate an example configuration file.
pub fn example_config() -> &'static str {
    r#"# CG Configuration File
# Author: Eshan Roy
# SPDX-License-Identifier: MIT

[rules]
# Warn when the total bytes changed by a commit exceed this threshold
size_threshold_bytes = 262144

# Maximum path length (keeps the repository usable on Windows)
max_path_length = 208

# Extensions whose added lines are checked for tabs and forbidden markers
tracked_extensions = [
    ".bat", ".c", ".cgi", ".cmake", ".cpp", ".cs", ".css", ".F", ".f",
    ".h", ".inc", ".inl", ".java", ".js", ".php", ".pri", ".pro", ".ps1",
    ".py", ".sed", ".sh", ".svc", ".tpl",
]

# Extensions that must end with a terminating newline
newline_extensions = [".c", ".cpp", ".h", ".inl"]

# C/C++-family extensions subject to include and exception checks
cpp_extensions = [".c", ".cc", ".cpp", ".cxx", ".h", ".hpp", ".inl"]

# Extensions exempt from the CRLF line-ending check
crlf_exempt_extensions = [".bat", ".cmd", ".sln", ".vcxproj"]

# Regex patterns an added #include line must not match
forbidden_includes = ["\\\\"]

# Markers that block a commit when found in added lines (case-insensitive)
forbidden_markers = ["DO NOT COMMIT", "DO NOT MERGE", "NO NOT MERGE"]

# Token that suppresses the Jira-id requirement
jira_override_token = "NO_JIRA"

[hooks]
enabled = true
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_config_parses() {
        let config = crate::config::loader::parse_config(example_config()).unwrap();
        assert_eq!(config.rules.max_path_length, 208);
        assert_eq!(
            config.rules,
            // The example must stay in sync with the compiled defaults.
            default_config().rules
        );
    }
}
