/*
 * Non-blocking mode: run the popup in a detached copy of this executable
 */
use std::process::{Command, Stdio};

use log::debug;

use crate::app::Error;
use cursorpops_render::io::Options;

/// Arguments for the detached copy. Always blocking, or it would relaunch
/// itself forever.
pub fn relaunch_args(options: &Options) -> Vec<String> {
    Options {
        block: true,
        ..options.clone()
    }
    .to_args()
}

pub fn spawn_detached(options: &Options) -> Result<(), Error> {
    let exe = std::env::current_exe()?;

    let mut command = Command::new(&exe);
    command
        .args(relaunch_args(options))
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    detach(&mut command);

    let child = command.spawn()?;
    debug!("relaunched {} as pid {}", exe.display(), child.id());

    Ok(())
}

#[cfg(target_os = "windows")]
fn detach(command: &mut Command) {
    use std::os::windows::process::CommandExt;
    use windows::Win32::System::Threading::DETACHED_PROCESS;

    command.creation_flags(DETACHED_PROCESS.0);
}

#[cfg(unix)]
fn detach(command: &mut Command) {
    use std::os::unix::process::CommandExt;

    command.process_group(0);
}

#[cfg(not(any(unix, target_os = "windows")))]
fn detach(_command: &mut Command) {}

#[cfg(test)]
mod tests {
    use super::*;
    use cursorpops_render::io::{parse_tokens, Command as Parsed, Velocity};

    #[test]
    fn relaunch_forces_blocking_mode() {
        let args = relaunch_args(&Options::default());
        assert_eq!(args.last().map(String::as_str), Some("-b"));
    }

    #[test]
    fn relaunched_copy_sees_the_same_popup() {
        let options = Options {
            text: "Rising".into(),
            ease: true,
            velocity: Velocity::new(0.0, 1.5),
            ..Options::default()
        };

        let expected = Options {
            block: true,
            ..options.clone()
        };
        assert_eq!(
            parse_tokens(relaunch_args(&options)),
            Parsed::Show(expected)
        );
    }
}
