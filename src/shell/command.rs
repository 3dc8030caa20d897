//! Module `command`
//!
//! Parsing of interactive shell input into shell commands.

use crate::transfer::modes::TransferType;

// Shell command enum, one variant per interactive verb
#[derive(Debug, PartialEq)]
pub enum ShellCommand {
    Open { host: String, port: Option<u16> },
    Cd(String),
    Ls,
    LdName,
    CurrentDir,
    CdUp,
    RemoveDir(String),
    MakeDir(String),
    Reinitialize,
    Status,
    Del(String),
    Sys,
    Get(String),
    Put(String),
    Type(TransferType),
    Close,
    Quit,
    Empty,
    Unknown(String),
}

// Parse one input line into a ShellCommand. Verbs are case-insensitive,
// at most two arguments are taken, extra tokens are ignored. A known verb
// missing its required argument parses as Unknown.
pub fn parse_shell_command(raw: &str) -> ShellCommand {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return ShellCommand::Empty;
    }
    let mut parts = trimmed.split_whitespace();
    let verb = parts.next().unwrap_or("").to_ascii_lowercase();
    let arg1 = parts.next().unwrap_or("");
    let arg2 = parts.next().unwrap_or("");

    match verb.as_str() {
        "open" if !arg1.is_empty() => ShellCommand::Open {
            host: arg1.to_string(),
            port: arg2.parse().ok(),
        },
        "cd" if !arg1.is_empty() => ShellCommand::Cd(arg1.to_string()),
        "ls" => ShellCommand::Ls,
        "ldname" => ShellCommand::LdName,
        "currentdir" => ShellCommand::CurrentDir,
        "cdup" => ShellCommand::CdUp,
        "removedir" if !arg1.is_empty() => ShellCommand::RemoveDir(arg1.to_string()),
        "makedir" if !arg1.is_empty() => ShellCommand::MakeDir(arg1.to_string()),
        "reinitialize" => ShellCommand::Reinitialize,
        "status" => ShellCommand::Status,
        "del" if !arg1.is_empty() => ShellCommand::Del(arg1.to_string()),
        "sys" => ShellCommand::Sys,
        "get" if !arg1.is_empty() => ShellCommand::Get(arg1.to_string()),
        "put" if !arg1.is_empty() => ShellCommand::Put(arg1.to_string()),
        "type" => match TransferType::from_name(arg1) {
            Some(transfer_type) => ShellCommand::Type(transfer_type),
            None => ShellCommand::Unknown(trimmed.to_string()),
        },
        "close" => ShellCommand::Close,
        "quit" => ShellCommand::Quit,
        _ => ShellCommand::Unknown(trimmed.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_commands() {
        assert_eq!(parse_shell_command("ls"), ShellCommand::Ls);
        assert_eq!(parse_shell_command("ldname"), ShellCommand::LdName);
        assert_eq!(parse_shell_command("currentdir"), ShellCommand::CurrentDir);
        assert_eq!(parse_shell_command("cdup"), ShellCommand::CdUp);
        assert_eq!(parse_shell_command("status"), ShellCommand::Status);
        assert_eq!(parse_shell_command("sys"), ShellCommand::Sys);
        assert_eq!(parse_shell_command("reinitialize"), ShellCommand::Reinitialize);
        assert_eq!(parse_shell_command("close"), ShellCommand::Close);
        assert_eq!(parse_shell_command("quit"), ShellCommand::Quit);
    }

    #[test]
    fn test_parse_commands_with_args() {
        assert_eq!(
            parse_shell_command("cd /pub/files"),
            ShellCommand::Cd("/pub/files".to_string())
        );
        assert_eq!(
            parse_shell_command("get report.pdf"),
            ShellCommand::Get("report.pdf".to_string())
        );
        assert_eq!(
            parse_shell_command("put upload.txt"),
            ShellCommand::Put("upload.txt".to_string())
        );
        assert_eq!(
            parse_shell_command("del stale.log"),
            ShellCommand::Del("stale.log".to_string())
        );
        assert_eq!(
            parse_shell_command("makedir incoming"),
            ShellCommand::MakeDir("incoming".to_string())
        );
        assert_eq!(
            parse_shell_command("removedir incoming"),
            ShellCommand::RemoveDir("incoming".to_string())
        );
    }

    #[test]
    fn test_parse_open_variants() {
        assert_eq!(
            parse_shell_command("open ftp.example.com 2121"),
            ShellCommand::Open {
                host: "ftp.example.com".to_string(),
                port: Some(2121),
            }
        );
        assert_eq!(
            parse_shell_command("open 127.0.0.1"),
            ShellCommand::Open {
                host: "127.0.0.1".to_string(),
                port: None,
            }
        );
        // Non-numeric port token falls back to the configured default
        assert_eq!(
            parse_shell_command("open host bogus"),
            ShellCommand::Open {
                host: "host".to_string(),
                port: None,
            }
        );
    }

    #[test]
    fn test_parse_type_names() {
        assert_eq!(
            parse_shell_command("type binary"),
            ShellCommand::Type(TransferType::Binary)
        );
        assert_eq!(
            parse_shell_command("TYPE ASCII"),
            ShellCommand::Type(TransferType::Ascii)
        );
        assert_eq!(
            parse_shell_command("type ebcdic"),
            ShellCommand::Unknown("type ebcdic".to_string())
        );
    }

    #[test]
    fn test_parse_case_and_whitespace() {
        assert_eq!(parse_shell_command("  LS  "), ShellCommand::Ls);
        assert_eq!(parse_shell_command("QuIt"), ShellCommand::Quit);
        assert_eq!(
            parse_shell_command("Get  a.txt  extra  tokens"),
            ShellCommand::Get("a.txt".to_string())
        );
    }

    #[test]
    fn test_missing_argument_is_unknown() {
        assert_eq!(parse_shell_command("cd"), ShellCommand::Unknown("cd".to_string()));
        assert_eq!(parse_shell_command("get"), ShellCommand::Unknown("get".to_string()));
        assert_eq!(parse_shell_command("put"), ShellCommand::Unknown("put".to_string()));
        assert_eq!(parse_shell_command("open"), ShellCommand::Unknown("open".to_string()));
    }

    #[test]
    fn test_unknown_and_empty() {
        assert_eq!(
            parse_shell_command("frobnicate now"),
            ShellCommand::Unknown("frobnicate now".to_string())
        );
        assert_eq!(parse_shell_command(""), ShellCommand::Empty);
        assert_eq!(parse_shell_command("   "), ShellCommand::Empty);
    }
}
