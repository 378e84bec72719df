/*
 * Velocity literals, in pixels per second
 */

/// Screen-space drift. Positive `y` moves down.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

impl Velocity {
    pub const fn new(x: f32, y: f32) -> Velocity {
        Velocity { x, y }
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Inverse of [`parse_velocity`]: a lone upward speed when the drift is
    /// purely vertical, `x,y` otherwise.
    pub fn to_literal(self) -> String {
        if self.x == 0.0 {
            format!("{}", -self.y)
        } else {
            format!("{},{}", self.x, self.y)
        }
    }
}

/// `v` means "rise at v px/s", i.e. (0, -v). `x,y` is taken as given.
/// Malformed literals are a standstill.
pub fn parse_velocity(literal: &str) -> Velocity {
    let parsed = match literal.split_once(',') {
        None => component(literal).map(|speed| Velocity::new(0.0, -speed)),
        Some((x, y)) => component(x).zip(component(y)).map(|(x, y)| Velocity::new(x, y)),
    };

    parsed.unwrap_or_default()
}

fn component(text: &str) -> Option<f32> {
    text.trim().parse::<f32>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_value_rises() {
        assert_eq!(parse_velocity("-1.5"), Velocity::new(0.0, 1.5));
        assert_eq!(parse_velocity("2"), Velocity::new(0.0, -2.0));
    }

    #[test]
    fn pair_is_taken_verbatim() {
        assert_eq!(parse_velocity("1.0,-1.0"), Velocity::new(1.0, -1.0));
        assert_eq!(parse_velocity("0,-2"), Velocity::new(0.0, -2.0));
    }

    #[test]
    fn malformed_is_standstill() {
        assert!(parse_velocity("").is_zero());
        assert!(parse_velocity("fast").is_zero());
        assert!(parse_velocity("1,").is_zero());
        assert!(parse_velocity("1,2,3").is_zero());
        assert!(parse_velocity("inf").is_zero());
    }

    #[test]
    fn literal_reparses_to_the_same_velocity() {
        for velocity in [
            Velocity::new(0.0, -40.0),
            Velocity::new(0.0, 12.5),
            Velocity::new(3.0, -7.25),
            Velocity::new(-0.1, 0.0),
        ] {
            assert_eq!(parse_velocity(&velocity.to_literal()), velocity);
        }
    }
}
