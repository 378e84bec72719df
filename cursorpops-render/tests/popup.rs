use cursorpops_render::{
    io::{parse, Color, Command, Options, Velocity},
    popup::{Point, Presentation, Size, Tick},
};

fn options(raw: &str) -> Options {
    match parse(raw) {
        Command::Show(options) => options,
        Command::Help => panic!("{raw:?} asked for help"),
    }
}

#[test]
fn every_flag_survives_a_relaunch() {
    let cases = [
        "hello",
        "-t \"two words\" -f",
        "x -o",
        "x -o #102030",
        "x -c 1,0.5,0",
        "x -c 255,0,255",
        "x -e",
        "x -e 0.25",
        "x -d 7.5",
        "x -d 0",
        "x -v -1.5",
        "x -v 1.0,-1.0",
        "x -v 3,0",
        "\"Rising\" -v -1.5 -e 2 -d 5 -o 0,0,255 -c #FFFF00 -f -b",
    ];

    for raw in cases {
        let first = options(raw);
        let relaunched = options(&first.to_command_line());
        assert_eq!(relaunched, first, "{raw:?} -> {:?}", first.to_command_line());
    }
}

#[test]
fn full_timeline_of_a_rising_faded_popup() {
    let options = options("Float -v 0,-10 -d 1 -e 1");
    assert_eq!(options.velocity, Velocity::new(0.0, -10.0));
    assert_eq!(options.text_color, Color::WHITE);

    let mut presentation = Presentation::new();
    let cursor = Point::new(200, 200);
    let text = Size::new(40, 10);

    let mut last_y = i32::MAX;
    let mut last_opacity = u8::MAX;
    let mut elapsed = 0;
    loop {
        match presentation.update(elapsed, &options, &cursor, text) {
            Tick::Present(frame) => {
                assert!(frame.bounds.position.y <= last_y);
                assert!(frame.opacity <= last_opacity);
                last_y = frame.bounds.position.y;
                last_opacity = frame.opacity;
            }
            Tick::Terminate => break,
        }
        elapsed += 16;
    }

    assert!(elapsed > 2000 && elapsed <= 2016);
    assert_eq!(last_y, 200 - 10 - 20 - 20);
    assert_eq!(last_opacity, 0);
}
