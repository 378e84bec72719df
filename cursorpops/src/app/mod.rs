/*
 * app module
 *
 * a single popup window driven by the tao event loop on the main thread. the
 * loop sleeps until the next tick, steps the presentation and repaints.
 */
use log::debug;
use tao::{
    event::{Event, StartCause},
    event_loop::{ControlFlow, EventLoop},
};
use thiserror::Error;

use cursorpops_render::{gfx::GfxError, io::Options};

pub mod relaunch;
pub mod timer;
mod window;
pub use window::*;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to create popup window")]
    Window(#[from] tao::error::OsError),

    #[error("failed to set up drawing")]
    Gfx(#[from] GfxError),

    #[error("failed to relaunch detached")]
    Relaunch(#[from] std::io::Error),
}

#[cfg(target_os = "windows")]
pub fn show_usage() {
    use windows::{
        core::HSTRING,
        Win32::{
            Foundation::HWND,
            UI::WindowsAndMessaging::{MessageBoxW, MB_ICONINFORMATION, MB_OK},
        },
    };

    unsafe {
        MessageBoxW(
            HWND(0),
            &HSTRING::from(cursorpops_render::io::USAGE),
            &HSTRING::from("cursorpops usage"),
            MB_OK | MB_ICONINFORMATION,
        );
    }
}

#[cfg(not(target_os = "windows"))]
pub fn show_usage() {
    print!("{}", cursorpops_render::io::USAGE);
}

/// Shows the popup until it has run its course. Only returns on failure.
pub fn run(options: Options) -> Result<(), Error> {
    let event_loop = EventLoop::new();
    let mut popup = Popup::build(&event_loop, options)?;
    let mut done = false;

    event_loop.run(move |event, event_loop, control_flow| {
        if done {
            *control_flow = ControlFlow::Exit;
            return;
        }

        match event {
            Event::NewEvents(StartCause::Init) => {
                #[cfg(target_os = "macos")]
                {
                    use tao::platform::macos::{ActivationPolicy, EventLoopWindowTargetExtMacOS};
                    event_loop.set_activation_policy_at_runtime(ActivationPolicy::Accessory);
                }
                #[cfg(not(target_os = "macos"))]
                let _ = event_loop;

                match popup.show() {
                    Some(next) => *control_flow = ControlFlow::WaitUntil(next),
                    None => done = true,
                }
            }
            Event::NewEvents(_) => {
                if popup.tick_due() {
                    match popup.tick() {
                        Some(next) => *control_flow = ControlFlow::WaitUntil(next),
                        None => done = true,
                    }
                }
            }
            Event::WindowEvent { event, .. } => popup.handle(event),
            Event::RedrawRequested(_) => popup.redraw(),
            Event::LoopDestroyed => debug!("popup closed"),
            _ => (),
        }

        if done {
            *control_flow = ControlFlow::Exit;
        }
    })
}
