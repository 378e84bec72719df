/*
 * cursorpops-render
 *
 * everything about a popup that does not need a window: reading the command
 * line, stepping the presentation over time, and painting the text onto a
 * surface that the binary hands us.
 */
pub mod gfx;
pub mod io;
pub mod popup;
