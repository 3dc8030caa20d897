//! Module `runner`
//!
//! The interactive shell loop: connect, login, then dispatch typed verbs
//! onto session and transfer operations.

use log::warn;
use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::config::ClientConfig;
use crate::error::handlers::handle_error;
use crate::error::FtpResult;
use crate::protocol::Reply;
use crate::session::ControlSession;
use crate::shell::command::{ShellCommand, parse_shell_command};
use crate::transfer;

#[derive(Debug, PartialEq)]
enum ShellOutcome {
    Continue,
    Exit,
}

/// Runs the interactive shell until `quit` or end of input.
///
/// A host given on the command line is opened before the first prompt;
/// while the session is disconnected the shell prompts for host info
/// until an `open` succeeds, then drops into the command loop.
pub fn run(config: ClientConfig, host: Option<String>, port: Option<u16>) {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut session = ControlSession::new(config);

    if let Some(host) = host {
        open_session(&mut session, &mut input, &host, port);
    }

    loop {
        if !session.is_connected() && !connect_phase(&mut session, &mut input) {
            break;
        }
        let line = match prompt_line(&mut input, "ftp> ") {
            Some(line) => line,
            None => break,
        };
        match dispatch(&mut session, &mut input, &line) {
            ShellOutcome::Continue => {}
            ShellOutcome::Exit => break,
        }
    }
    session.terminate();
}

// Prompt for host info until the session is connected. Only `open` makes
// progress here; returns false when the user quits or input ends.
fn connect_phase(session: &mut ControlSession, input: &mut impl BufRead) -> bool {
    while !session.is_connected() {
        println!("Please provide host info; expected format is:");
        println!("\topen <host> [port]");
        let line = match prompt_line(input, "ftp> ") {
            Some(line) => line,
            None => return false,
        };
        match parse_shell_command(&line) {
            ShellCommand::Open { host, port } => {
                open_session(session, input, &host, port);
            }
            ShellCommand::Quit => return false,
            ShellCommand::Empty => {}
            _ => println!("Not connected"),
        }
    }
    true
}

// Connect phase followed by the login phase.
fn open_session(
    session: &mut ControlSession,
    input: &mut impl BufRead,
    host: &str,
    port: Option<u16>,
) {
    let port = port.unwrap_or(session.default_port());
    if let Err(e) = session.connect(host, port) {
        handle_error(&e);
        println!("Connection to {host}:{port} failed");
        return;
    }
    login_phase(session, input, host);
}

// Prompt for credentials until the server accepts them, then report the
// remote system type.
fn login_phase(session: &mut ControlSession, input: &mut impl BufRead, host: &str) {
    let local_user = std::env::var("USER").unwrap_or_default();
    loop {
        let name = match prompt_line(input, &format!("Name ({host}:{local_user}): ")) {
            Some(name) => name,
            None => return,
        };
        let password = match prompt_line(input, "Password: ") {
            Some(password) => password,
            None => return,
        };
        match session.login(name.trim(), password.trim()) {
            Ok(()) => break,
            Err(e) => {
                handle_error(&e);
                println!("Login failed");
                if !session.is_connected() {
                    return;
                }
            }
        }
    }
    match session.system_type() {
        Ok(reply) => println!("Remote system type is {}", reply.text().trim_end()),
        Err(e) => handle_error(&e),
    }
}

fn dispatch(
    session: &mut ControlSession,
    input: &mut impl BufRead,
    line: &str,
) -> ShellOutcome {
    match parse_shell_command(line) {
        ShellCommand::Open { host, port } => {
            if session.is_connected() {
                println!(
                    "Already connected to {}",
                    session.host_address().unwrap_or_default()
                );
            } else {
                open_session(session, input, &host, port);
            }
        }
        ShellCommand::Cd(path) => report(session.change_dir(&path), "cd"),
        ShellCommand::Ls => {
            if let Err(e) = transfer::list_directory(session, &mut io::stdout().lock()) {
                handle_error(&e);
                println!("ls failed");
            }
        }
        ShellCommand::LdName => {
            if let Err(e) = transfer::list_names(session, &mut io::stdout().lock()) {
                handle_error(&e);
                println!("ldname failed");
            }
        }
        ShellCommand::CurrentDir => report(session.current_dir(), "currentdir"),
        ShellCommand::CdUp => report(session.change_dir_up(), "cdup"),
        ShellCommand::RemoveDir(path) => report(session.remove_dir(&path), "removedir"),
        ShellCommand::MakeDir(path) => report(session.make_dir(&path), "makedir"),
        ShellCommand::Reinitialize => report(session.reinitialize(), "reinitialize"),
        ShellCommand::Status => report(session.server_status(), "status"),
        ShellCommand::Del(name) => report(session.delete_file(&name), "del"),
        ShellCommand::Sys => report(session.system_type(), "sys"),
        ShellCommand::Get(name) => {
            match transfer::download_file(session, &name, Path::new(&name)) {
                Ok(()) => println!("Retrieved {name}"),
                Err(e) => {
                    handle_error(&e);
                    println!("get failed");
                }
            }
        }
        ShellCommand::Put(name) => {
            match transfer::upload_file(session, Path::new(&name), &name) {
                Ok(()) => println!("Stored {name}"),
                Err(e) => {
                    handle_error(&e);
                    println!("put failed");
                }
            }
        }
        ShellCommand::Type(transfer_type) => match session.set_transfer_type(transfer_type) {
            Ok(()) => println!("Type set to {transfer_type}"),
            Err(e) => {
                handle_error(&e);
                println!("type failed");
            }
        },
        ShellCommand::Close => {
            session.terminate();
            println!("Connection closed");
        }
        ShellCommand::Quit => return ShellOutcome::Exit,
        ShellCommand::Empty => {}
        ShellCommand::Unknown(text) => println!("Unknown command: {text}"),
    }
    ShellOutcome::Continue
}

fn report(result: FtpResult<Reply>, verb: &str) {
    match result {
        Ok(reply) => println!("{}", reply.text().trim_end()),
        Err(e) => {
            handle_error(&e);
            println!("{verb} failed");
        }
    }
}

fn prompt_line(input: &mut impl BufRead, prompt: &str) -> Option<String> {
    print!("{prompt}");
    let _ = io::stdout().flush();
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line),
        Err(e) => {
            warn!("Failed to read input: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};
    use std::net::TcpListener;
    use std::thread;

    #[test]
    fn test_quit_exits_loop() {
        let mut session = ControlSession::default();
        let mut input = Cursor::new(Vec::new());
        assert_eq!(
            dispatch(&mut session, &mut input, "quit"),
            ShellOutcome::Exit
        );
    }

    #[test]
    fn test_unknown_command_continues() {
        let mut session = ControlSession::default();
        let mut input = Cursor::new(Vec::new());
        assert_eq!(
            dispatch(&mut session, &mut input, "frobnicate"),
            ShellOutcome::Continue
        );
        assert!(!session.is_connected());
    }

    #[test]
    fn test_session_commands_require_connection() {
        let mut session = ControlSession::default();
        let mut input = Cursor::new(Vec::new());
        assert_eq!(
            dispatch(&mut session, &mut input, "currentdir"),
            ShellOutcome::Continue
        );
        assert_eq!(
            dispatch(&mut session, &mut input, "ls"),
            ShellOutcome::Continue
        );
        assert!(!session.is_connected());
        assert!(!session.is_data_connected());
    }

    #[test]
    fn test_connect_phase_ends_on_quit() {
        let mut session = ControlSession::default();
        let mut input = Cursor::new(b"quit\n".to_vec());
        assert!(!connect_phase(&mut session, &mut input));
        assert!(!session.is_connected());
    }

    #[test]
    fn test_connect_phase_ignores_other_verbs() {
        let mut session = ControlSession::default();
        let mut input = Cursor::new(b"ls\ncurrentdir\nget notes.txt\n".to_vec());
        assert!(!connect_phase(&mut session, &mut input));
        assert!(!session.is_connected());
    }

    #[test]
    fn test_connect_phase_opens_and_logs_in() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let server = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = [0u8; 256];
            stream.write_all(b"220 Service ready\r\n").unwrap();
            stream.read(&mut buf).unwrap();
            stream.write_all(b"331 Password required\r\n").unwrap();
            stream.read(&mut buf).unwrap();
            stream.write_all(b"230 Logged in\r\n").unwrap();
            stream.read(&mut buf).unwrap();
            stream.write_all(b"215 UNIX Type: L8\r\n").unwrap();
        });

        let mut session = ControlSession::default();
        let script = format!("open 127.0.0.1 {port}\nalice\nsecret\n");
        let mut input = Cursor::new(script.into_bytes());
        assert!(connect_phase(&mut session, &mut input));
        assert!(session.is_connected());
        drop(session);
        server.join().unwrap();
    }
}
