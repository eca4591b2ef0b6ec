#![allow(dead_code)]

pub mod command;
pub mod file;

pub const HEX40: &str = r"^[0-9a-f]{40}\n$";

/// Stdout of a successful command as a trimmed string
pub fn stdout_of(assert: assert_cmd::assert::Assert) -> String {
    String::from_utf8_lossy(&assert.get_output().stdout)
        .trim_end()
        .to_string()
}
