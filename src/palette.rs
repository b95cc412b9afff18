use chrono::Timelike;
use serde::Serialize;

/// First hour (inclusive) of the morning palette.
pub const MORNING_START: u32 = 5;

/// First hour of the evening palette.
pub const EVENING_START: u32 = 17;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn from_u32(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: (value & 0xFF) as u8,
        }
    }

    pub fn color(self) -> ratatui::style::Color {
        ratatui::style::Color::Rgb(self.r, self.g, self.b)
    }

    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<Rgb> for ratatui::style::Color {
    fn from(c: Rgb) -> Self {
        c.color()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Evening,
}

impl TimeOfDay {
    pub fn from_hour(hour: u32) -> Self {
        if (MORNING_START..EVENING_START).contains(&hour) {
            Self::Morning
        } else {
            Self::Evening
        }
    }

    pub fn now() -> Self {
        Self::from_hour(current_hour())
    }
}

/// The seven colors a card is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb,
    pub paper: Rgb,
    pub ink: Rgb,
    pub muted: Rgb,
    pub line: Rgb,
    pub accent_bg: Rgb,
    pub accent_line: Rgb,
}

impl Palette {
    /// Lavender morning.
    pub const MORNING: Self = Self {
        background: Rgb::from_u32(0xf6f3f8),
        paper: Rgb::from_u32(0xfffefe),
        ink: Rgb::from_u32(0x4a4458),
        muted: Rgb::from_u32(0x8a8399),
        line: Rgb::from_u32(0xe6e1ec),
        accent_bg: Rgb::from_u32(0xf2eef7),
        accent_line: Rgb::from_u32(0xc9c3d8),
    };

    /// Dusk blue.
    pub const EVENING: Self = Self {
        background: Rgb::from_u32(0xf1f0f6),
        paper: Rgb::from_u32(0xfbfbfd),
        ink: Rgb::from_u32(0x3f3a4d),
        muted: Rgb::from_u32(0x7b748a),
        line: Rgb::from_u32(0xdedbea),
        accent_bg: Rgb::from_u32(0xebe9f2),
        accent_line: Rgb::from_u32(0xbfb9d1),
    };

    pub fn for_time_of_day(time_of_day: TimeOfDay) -> Self {
        match time_of_day {
            TimeOfDay::Morning => Self::MORNING,
            TimeOfDay::Evening => Self::EVENING,
        }
    }

    /// Hours in `[5, 17)` are morning, everything else (including values past 23) evening.
    pub fn for_hour(hour: u32) -> Self {
        Self::for_time_of_day(TimeOfDay::from_hour(hour))
    }

    /// Reads the local clock once.
    pub fn now() -> Self {
        Self::for_time_of_day(TimeOfDay::now())
    }

    /// `(name, "#rrggbb")` pairs, named as in the JSON output.
    pub fn hex_entries(&self) -> [(&'static str, String); 7] {
        [
            ("background", self.background.hex()),
            ("paper", self.paper.hex()),
            ("ink", self.ink.hex()),
            ("muted", self.muted.hex()),
            ("line", self.line.hex()),
            ("accentBg", self.accent_bg.hex()),
            ("accentLine", self.accent_line.hex()),
        ]
    }

    pub fn to_hex(&self) -> HexPalette {
        HexPalette {
            background: self.background.hex(),
            paper: self.paper.hex(),
            ink: self.ink.hex(),
            muted: self.muted.hex(),
            line: self.line.hex(),
            accent_bg: self.accent_bg.hex(),
            accent_line: self.accent_line.hex(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HexPalette {
    pub background: String,
    pub paper: String,
    pub ink: String,
    pub muted: String,
    pub line: String,
    pub accent_bg: String,
    pub accent_line: String,
}

pub fn current_hour() -> u32 {
    chrono::Local::now().hour()
}
