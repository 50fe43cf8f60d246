//! Device geometry table.
//!
//! Every supported device diagram is described by a [`DeviceProfile`]: how
//! many qubits it has, how large its diagrams are and where each qubit sits
//! on the gate diagram. The x-ray chip photo is shared by all 5-qubit
//! devices and described by [`XRAY_DIAGRAM`].
//!
//! | Device | Qubits | Gate diagram | X-ray | Example backends |
//! |--------|--------|--------------|-------|------------------|
//! | `sparrow` | 5 | 200 x 200 | 300 x 300 | Yorktown, Tenerife |
//! | `snake` | 5 | 200 x 200 | - | Athens, Santiago |
//! | `giraffe` | 5 | 200 x 200 | - | Vigo, Ourense, Valencia |
//! | `albatross` | 15 | 500 x 100 | - | Melbourne |
//! | `unknown20a` | 20 | 250 x 250 | - | Johannesburg, Poughkeepsie |
//! | `unknown20b` | 20 | 250 x 250 | - | Almaden, Boeblingen, Singapore |
//! | `unknown53a` | 53 | 300 x 300 | - | Rochester |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AnimError, AnimResult};

/// Pixels per inch used to convert diagram sizes to figure sizes.
pub const DPI: f64 = 100.0;

/// Diagram style the shots are drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Gate map diagram with a circle per qubit.
    Gate,
    /// X-ray photo of the chip with a rounded box per readout resonator.
    Xray,
}

impl FromStr for Layout {
    type Err = AnimError;

    fn from_str(s: &str) -> AnimResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "gate" => Ok(Layout::Gate),
            "xray" => Ok(Layout::Xray),
            _ => Err(AnimError::UnsupportedRenderMode(s.to_string())),
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::Gate => f.write_str("gate"),
            Layout::Xray => f.write_str("xray"),
        }
    }
}

/// Image size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Figure size in inches at [`DPI`].
    pub fn inches(self) -> (f64, f64) {
        (f64::from(self.width) / DPI, f64::from(self.height) / DPI)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A pixel position on a diagram.
pub type Point = (u32, u32);

/// Static layout metadata for one device diagram.
#[derive(Debug, Serialize)]
pub struct DeviceProfile {
    /// Lowercase device name.
    pub name: &'static str,
    /// Number of qubits on the device.
    pub num_qubits: usize,
    /// Gate diagram size.
    pub gate_size: Size,
    /// Size of a device-specific x-ray photo, if the device has one.
    pub xray_size: Option<Size>,
    /// Gate diagram position of each qubit, qubit 0 first.
    pub gate_coords: &'static [Point],
}

impl DeviceProfile {
    /// Check that shots of `width` bits fit on this device.
    pub fn check_width(&self, width: usize) -> AnimResult<()> {
        if width > self.num_qubits {
            return Err(AnimError::UnsupportedQubitCount {
                required: width,
                capacity: self.num_qubits,
            });
        }
        Ok(())
    }

    /// Whether the shared x-ray diagram can show this device.
    pub fn supports_xray(&self) -> bool {
        self.num_qubits <= XRAY_DIAGRAM.capacity()
    }

    /// Canvas size for the given layout.
    pub fn canvas_size(&self, layout: Layout) -> AnimResult<Size> {
        match layout {
            Layout::Gate => Ok(self.gate_size),
            Layout::Xray => {
                XRAY_DIAGRAM.check_width(self.num_qubits)?;
                Ok(self.xray_size.unwrap_or(XRAY_DIAGRAM.size))
            }
        }
    }

    /// Asset file name of the gate diagram.
    pub fn gate_asset(&self) -> String {
        format!("{}.png", self.name)
    }
}

/// A readout resonator box on the x-ray diagram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Resonator {
    /// Top-left corner.
    pub origin: Point,
    /// Box width.
    pub width: u32,
    /// Box height.
    pub height: u32,
}

/// The shared x-ray diagram of the 5-qubit chip.
#[derive(Debug, Serialize)]
pub struct XrayDiagram {
    /// Photo size.
    pub size: Size,
    /// One resonator per qubit, qubit 0 first.
    pub resonators: [Resonator; 5],
    /// Asset with qubit labels.
    pub labelled_asset: &'static str,
    /// Asset without labels.
    pub unlabelled_asset: &'static str,
}

impl XrayDiagram {
    /// Number of qubits the diagram can show.
    pub const fn capacity(&self) -> usize {
        self.resonators.len()
    }

    /// Check that shots of `width` bits fit on the x-ray diagram.
    pub fn check_width(&self, width: usize) -> AnimResult<()> {
        if width > self.capacity() {
            return Err(AnimError::UnsupportedQubitCount {
                required: width,
                capacity: self.capacity(),
            });
        }
        Ok(())
    }

    /// Asset file name for the requested label variant.
    pub fn asset(&self, labelled: bool) -> &'static str {
        if labelled {
            self.labelled_asset
        } else {
            self.unlabelled_asset
        }
    }
}

const fn resonator(x: u32, y: u32, width: u32, height: u32) -> Resonator {
    Resonator {
        origin: (x, y),
        width,
        height,
    }
}

/// X-ray photo shared by all 5-qubit devices.
pub static XRAY_DIAGRAM: XrayDiagram = XrayDiagram {
    size: Size::new(300, 300),
    resonators: [
        resonator(141, 245, 134, 27),
        resonator(27, 226, 91, 45),
        resonator(37, 97, 37, 103),
        resonator(27, 27, 91, 44),
        resonator(141, 27, 134, 26),
    ],
    labelled_asset: "sparrow_xray_labelled.png",
    unlabelled_asset: "sparrow_xray_unlabelled.png",
};

// q0 left, q1 top, q2 centre, q3 right, q4 bottom
const CROSS_5: [Point; 5] = [(30, 100), (100, 31), (100, 100), (170, 100), (100, 169)];

// q0..q6 along the top row, q7..q14 back along the bottom row
const LADDER_15: [Point; 15] = [
    (55, 22),
    (111, 22),
    (167, 22),
    (222, 22),
    (278, 22),
    (334, 22),
    (390, 22),
    (446, 76),
    (390, 76),
    (334, 76),
    (278, 76),
    (222, 76),
    (167, 76),
    (111, 76),
    (55, 76),
];

const GRID_20: [Point; 20] = [
    (20, 32),
    (69, 32),
    (121, 32),
    (173, 32),
    (225, 32),
    (20, 92),
    (69, 92),
    (121, 92),
    (173, 92),
    (225, 92),
    (20, 154),
    (69, 154),
    (121, 154),
    (173, 154),
    (225, 154),
    (20, 217),
    (69, 217),
    (121, 217),
    (173, 217),
    (225, 217),
];

#[rustfmt::skip]
const HEAVY_HEX_53: [Point; 53] = [
                        (85, 18),  (117, 18),  (149, 18),  (181, 18),  (213, 18),
                        (85, 46),                                      (213, 46),
    (19, 75),  (52, 75),  (85, 75),  (117, 75),  (149, 75),  (181, 75),  (213, 75),  (246, 75),  (279, 75),
    (19, 106),                                   (149, 106),                                    (279, 106),
    (19, 135), (52, 135), (85, 135), (117, 135), (149, 135), (181, 135), (213, 135), (246, 135), (279, 135),
                          (85, 165),                                     (213, 165),
    (19, 195), (52, 195), (85, 195), (117, 195), (149, 195), (181, 195), (213, 195), (246, 195), (279, 195),
    (19, 224),                                   (149, 224),                                    (279, 224),
    (19, 253), (52, 253), (85, 253), (117, 253), (149, 253), (181, 253), (213, 253), (246, 253), (279, 253),
                          (85, 283),                                     (213, 283),
];

/// All supported devices. Order matters: auto-selection picks the first
/// device large enough for a circuit.
pub static DEVICES: [DeviceProfile; 7] = [
    DeviceProfile {
        name: "sparrow",
        num_qubits: 5,
        gate_size: Size::new(200, 200),
        xray_size: Some(Size::new(300, 300)),
        gate_coords: &CROSS_5,
    },
    DeviceProfile {
        name: "snake",
        num_qubits: 5,
        gate_size: Size::new(200, 200),
        xray_size: None,
        gate_coords: &CROSS_5,
    },
    DeviceProfile {
        name: "giraffe",
        num_qubits: 5,
        gate_size: Size::new(200, 200),
        xray_size: None,
        gate_coords: &CROSS_5,
    },
    DeviceProfile {
        name: "albatross",
        num_qubits: 15,
        gate_size: Size::new(500, 100),
        xray_size: None,
        gate_coords: &LADDER_15,
    },
    DeviceProfile {
        name: "unknown20a",
        num_qubits: 20,
        gate_size: Size::new(250, 250),
        xray_size: None,
        gate_coords: &GRID_20,
    },
    DeviceProfile {
        name: "unknown20b",
        num_qubits: 20,
        gate_size: Size::new(250, 250),
        xray_size: None,
        gate_coords: &GRID_20,
    },
    DeviceProfile {
        name: "unknown53a",
        num_qubits: 53,
        gate_size: Size::new(300, 300),
        xray_size: None,
        gate_coords: &HEAVY_HEX_53,
    },
];

/// All supported devices in table order.
pub fn supported_devices() -> &'static [DeviceProfile] {
    &DEVICES
}

/// Names of all supported devices in table order.
pub fn supported_names() -> Vec<&'static str> {
    DEVICES.iter().map(|d| d.name).collect()
}

/// Look up a device by name, ignoring case and surrounding whitespace.
pub fn lookup(name: &str) -> AnimResult<&'static DeviceProfile> {
    let wanted = name.trim().to_lowercase();
    DEVICES
        .iter()
        .find(|d| d.name == wanted)
        .ok_or_else(|| AnimError::UnknownDevice {
            name: name.to_string(),
            supported: supported_names(),
        })
}

/// Figure size in inches for a device and layout.
pub fn fig_size(layout: Layout, name: &str) -> AnimResult<(f64, f64)> {
    Ok(lookup(name)?.canvas_size(layout)?.inches())
}
