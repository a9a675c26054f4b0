//! Colours for the renderer. Hue, saturation and value are all bytes, hue
//! covering the full circle in 0..=255.

use std::str::FromStr;

use serde::Deserialize;

use crate::grid::Cell;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Hsv {
    pub h: u8,
    pub s: u8,
    pub v: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 0xff]
    }
}

impl FromStr for Rgb {
    type Err = String;

    /// `#rrggbb` or `rrggbb`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(format!("expected #rrggbb, got {s:?}"));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| format!("{s:?}: {e}"))
        };
        Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

pub fn hsv_to_rgb(hsv: Hsv) -> Rgb {
    let v = hsv.v;
    if hsv.s == 0 {
        return Rgb::new(v, v, v);
    }

    let (h, s, v16) = (hsv.h as u16, hsv.s as u16, v as u16);
    let region = h / 43;
    let remainder = (h - region * 43) * 6;

    let p = ((v16 * (255 - s)) >> 8) as u8;
    let q = ((v16 * (255 - ((s * remainder) >> 8))) >> 8) as u8;
    let t = ((v16 * (255 - ((s * (255 - remainder)) >> 8))) >> 8) as u8;

    match region {
        0 => Rgb::new(v, t, p),
        1 => Rgb::new(q, v, p),
        2 => Rgb::new(p, v, t),
        3 => Rgb::new(p, q, v),
        4 => Rgb::new(t, p, v),
        _ => Rgb::new(v, p, q),
    }
}

pub fn rgb_to_hsv(rgb: Rgb) -> Hsv {
    let min = rgb.r.min(rgb.g).min(rgb.b);
    let max = rgb.r.max(rgb.g).max(rgb.b);

    let v = max;
    if v == 0 {
        return Hsv::default();
    }

    let delta = (max - min) as i32;
    let s = (255 * delta / v as i32) as u8;
    if s == 0 {
        return Hsv { h: 0, s: 0, v };
    }

    let (r, g, b) = (rgb.r as i32, rgb.g as i32, rgb.b as i32);
    let h = if max == rgb.r {
        43 * (g - b) / delta
    } else if max == rgb.g {
        85 + 43 * (b - r) / delta
    } else {
        171 + 43 * (r - g) / delta
    };

    Hsv {
        h: h.rem_euclid(256) as u8,
        s,
        v,
    }
}

fn lerp(a: u8, b: u8, t: f32) -> u8 {
    (a as f32 + (b as f32 - a as f32) * t).round().clamp(0., 255.) as u8
}

/// Maps cells to pixels. Live cells fade from `young` to `old` in HSV space
/// as they age, reaching `old` at `max_age`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Palette {
    young: Hsv,
    old: Hsv,
    dead: [u8; 4],
    max_age: u32,
}

impl Palette {
    pub fn new(young: Rgb, old: Rgb, dead: Rgb, max_age: u32) -> Self {
        Self {
            young: rgb_to_hsv(young),
            old: rgb_to_hsv(old),
            dead: dead.rgba(),
            max_age: max_age.max(1),
        }
    }

    pub fn color(&self, cell: Cell, age: u32) -> [u8; 4] {
        if !cell.is_alive() {
            return self.dead;
        }
        let t = age.min(self.max_age) as f32 / self.max_age as f32;
        let hsv = Hsv {
            h: lerp(self.young.h, self.old.h, t),
            s: lerp(self.young.s, self.old.s, t),
            v: lerp(self.young.v, self.old.v, t),
        };
        hsv_to_rgb(hsv).rgba()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hex() {
        assert_eq!("#ff8000".parse::<Rgb>(), Ok(Rgb::new(255, 128, 0)));
        assert_eq!(" 0a0B0c".parse::<Rgb>(), Ok(Rgb::new(10, 11, 12)));
        assert!("#fff".parse::<Rgb>().is_err());
        assert!("#gg0000".parse::<Rgb>().is_err());
    }

    #[test]
    fn greys_have_no_saturation() {
        let hsv = rgb_to_hsv(Rgb::new(90, 90, 90));
        assert_eq!(hsv, Hsv { h: 0, s: 0, v: 90 });
        assert_eq!(hsv_to_rgb(hsv), Rgb::new(90, 90, 90));
        assert_eq!(rgb_to_hsv(Rgb::new(0, 0, 0)), Hsv::default());
    }

    #[test]
    fn primaries() {
        assert_eq!(rgb_to_hsv(Rgb::new(255, 0, 0)), Hsv { h: 0, s: 255, v: 255 });
        assert_eq!(rgb_to_hsv(Rgb::new(0, 255, 0)), Hsv { h: 85, s: 255, v: 255 });
        assert_eq!(rgb_to_hsv(Rgb::new(0, 0, 255)), Hsv { h: 171, s: 255, v: 255 });
        assert_eq!(hsv_to_rgb(Hsv { h: 0, s: 255, v: 255 }), Rgb::new(255, 0, 0));
    }

    #[test]
    fn magenta_hue_wraps() {
        // r is max, g < b gives a negative offset
        let hsv = rgb_to_hsv(Rgb::new(255, 0, 128));
        assert!(hsv.h > 200);
    }

    #[test]
    fn palette_ends() {
        let young = Rgb::new(255, 0, 0);
        let old = Rgb::new(0, 0, 255);
        let dead = Rgb::new(1, 2, 3);
        let palette = Palette::new(young, old, dead, 10);

        assert_eq!(palette.color(Cell::Dead, 0), [1, 2, 3, 255]);
        assert_eq!(palette.color(Cell::Alive, 0), hsv_to_rgb(rgb_to_hsv(young)).rgba());
        assert_eq!(palette.color(Cell::Alive, 10), hsv_to_rgb(rgb_to_hsv(old)).rgba());
        assert_eq!(palette.color(Cell::Alive, 500), palette.color(Cell::Alive, 10));
        assert_ne!(palette.color(Cell::Alive, 5), palette.color(Cell::Alive, 0));
    }
}
