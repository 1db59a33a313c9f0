//! # Style Configuration
//!
//! Static design tokens for the agricultural palette: named colors, emphasis
//! presets (the terminal stand-in for shadow depth), and a spacing scale.
//! Pure data, no runtime behavior.

use ratatui::style::{Color, Modifier};

// Primary agricultural colors
pub const AGRI_BLUE: Color = Color::Rgb(0x1E, 0x3A, 0x8A);
pub const AGRI_AMBER: Color = Color::Rgb(0xF5, 0x9E, 0x0B);
pub const AGRI_GREEN: Color = Color::Rgb(0x10, 0xB9, 0x81);

// Enhanced agricultural palette
pub const AGRI_PRIMARY: Color = Color::Rgb(0x2D, 0x50, 0x16); // Deep forest green
pub const AGRI_SECONDARY: Color = Color::Rgb(0x8B, 0x45, 0x13); // Rich earth brown
pub const AGRI_ACCENT: Color = Color::Rgb(0xFF, 0xB3, 0x47); // Warm harvest orange
pub const AGRI_SUCCESS: Color = Color::Rgb(0x22, 0x8B, 0x22); // Forest green
pub const AGRI_WARNING: Color = Color::Rgb(0xDA, 0xA5, 0x20); // Golden rod
pub const AGRI_INFO: Color = Color::Rgb(0x46, 0x82, 0xB4); // Steel blue
pub const AGRI_LIGHT: Color = Color::Rgb(0xF5, 0xF5, 0xDC); // Beige
pub const AGRI_DARK: Color = Color::Rgb(0x2F, 0x4F, 0x2F); // Dark slate gray

// Nature-inspired accents
pub const NATURE_WHEAT: Color = Color::Rgb(0xF5, 0xDE, 0xB3);
pub const NATURE_LEAF: Color = Color::Rgb(0x32, 0xCD, 0x32);
pub const NATURE_WATER: Color = Color::Rgb(0x41, 0x69, 0xE1);

// Severity presentation
pub const SEVERITY_HIGH: Color = Color::Rgb(0xDC, 0x26, 0x26);
pub const SEVERITY_MEDIUM: Color = AGRI_WARNING;
pub const SEVERITY_LOW: Color = AGRI_INFO;

// Emphasis presets (shadow-depth analogs)
pub const EMPHASIS_SM: Modifier = Modifier::DIM;
pub const EMPHASIS_MD: Modifier = Modifier::empty();
pub const EMPHASIS_LG: Modifier = Modifier::BOLD;
pub const EMPHASIS_XL: Modifier = Modifier::BOLD.union(Modifier::REVERSED);

// Spacing scale (columns/rows)
pub const SPACE_XS: u16 = 1;
pub const SPACE_SM: u16 = 2;
pub const SPACE_MD: u16 = 4;
pub const SPACE_LG: u16 = 6;
