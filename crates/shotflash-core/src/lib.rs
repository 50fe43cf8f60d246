//! `shotflash-core` — quantum measurement shots as flashing qubit animations.
//!
//! A job result reports how often each bitstring was measured. This crate
//! turns those counts back into individual shots and plays them as a looping
//! GIF: every frame shows one shot on a diagram of the device, with a marker
//! lit over each qubit that measured `1`, like a readout pulse.
//!
//! Two diagram styles are supported:
//!
//! - **gate** — the device's gate map, one circle per qubit
//! - **xray** — an x-ray photo of a 5-qubit chip, one rounded box per
//!   readout resonator
//!
//! # Quick start
//!
//! ```no_run
//! use shotflash_core::{AnimationConfig, Counts, save_quantum_animation};
//!
//! let counts = Counts::from_pairs([("000", 510), ("111", 514)]);
//! let config = AnimationConfig::new("ghz.gif", "gate", "sparrow");
//! let saved = save_quantum_animation(&config, &counts)?;
//! assert!(saved);
//! # Ok::<(), shotflash_core::AnimError>(())
//! ```
//!
//! # Picking a device
//!
//! ```rust
//! use shotflash_core::select::{BackendDescriptor, CircuitDescriptor, get_sample};
//!
//! let backend = BackendDescriptor::simulator();
//! let device = get_sample(&backend, &CircuitDescriptor { num_qubits: 18 }).unwrap();
//! assert_eq!(device, "unknown20a");
//! ```

pub mod animate;
pub mod assets;
pub mod canvas;
pub mod color;
pub mod config;
pub mod counts;
pub mod device;
pub mod error;
pub mod gif;
pub mod render;
pub mod select;
pub mod shots;

pub use animate::{Animator, save_quantum_animation};
pub use assets::AssetStore;
pub use color::Rgb;
pub use config::{AnimationConfig, ResolvedConfig};
pub use counts::Counts;
pub use device::{DeviceProfile, Layout, fig_size, lookup, supported_devices, supported_names};
pub use error::{AnimError, AnimResult};
pub use render::{FrameRenderer, GateRenderer, MarkerStyle, Playback, XrayRenderer};
pub use select::{BackendDescriptor, BackendInfo, CircuitDescriptor, CircuitInfo, get_sample};
pub use shots::{DEFAULT_SHOT_CAP, Shot, ShotList, compact, expand};
