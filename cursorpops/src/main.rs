/*
 * App entrypoint
 */
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use cursorpops_render::io::{self, Command};

mod app;

fn main() {
    env_logger::init();

    let args = std::env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned());

    let options = match io::parse_tokens(args) {
        Command::Help => {
            app::show_usage();
            return;
        }
        Command::Show(options) => options,
    };

    log::debug!("{:?}", options);

    // non-blocking: a detached copy shows the popup, we return at once
    if !options.block {
        match app::relaunch::spawn_detached(&options) {
            Ok(()) => return,
            Err(e) => log::warn!("{e}, showing popup in this process instead"),
        }
    }

    // a popup that cannot be shown still exits successfully
    if let Err(e) = app::run(options) {
        log::error!("{e}");
    }
}
