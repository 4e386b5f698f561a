//! Colour palette for the terminal map.

use floodroute_core::style::Color;

// -- Tiles --

/// Road: asphalt grey.
pub const ROAD_BG: Color = Color::from_rgb(0x73, 0x73, 0x73);
/// Building: off-white block.
pub const BUILDING_BG: Color = Color::from_rgb(0xff, 0xfc, 0xef);
pub const BUILDING_FG: Color = Color::from_rgb(0xd8, 0xd2, 0xb8);
/// Lake or flooded street.
pub const FLOOD_BG: Color = Color::from_rgb(0x41, 0xbf, 0xed);
pub const FLOOD_FG: Color = Color::from_rgb(0x1d, 0x8c, 0xc0);

// -- Overlays --

/// Cells on the current route.
pub const ROUTE_BG: Color = Color::from_rgb(0xa5, 0xe4, 0xff);
pub const START_BG: Color = Color::from_rgb(0x00, 0xb0, 0x50);
pub const END_BG: Color = Color::from_rgb(0xff, 0xb3, 0x00);
/// The moving vehicle.
pub const VEHICLE_BG: Color = Color::from_rgb(0x00, 0x47, 0xff);
/// Dark text on light overlays.
pub const MARKER_FG: Color = Color::from_rgb(0x10, 0x10, 0x10);
pub const VEHICLE_FG: Color = Color::from_rgb(0xff, 0xff, 0xff);

// -- Text --

pub const FG: Color = Color::DEFAULT;
pub const FG_DIM: Color = Color::from_rgb(98, 100, 106);
pub const FG_EMPH: Color = Color::from_rgb(248, 248, 242);
pub const FG_ERROR: Color = Color::from_rgb(255, 85, 85);
pub const FG_OK: Color = Color::from_rgb(80, 200, 80);
pub const STATUS_BG: Color = Color::from_rgb(40, 42, 54);
