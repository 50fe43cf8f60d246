//! Animation driver.
//!
//! Ties the pieces together: compacts and expands the counts, builds the
//! renderer for the configured layout, renders one frame per shot and
//! streams the frames into a looping GIF.

use std::fs::{self, File, Permissions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use image::RgbaImage;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tempfile::NamedTempFile;
use tracing::{debug, error, info, warn};

use crate::assets::AssetStore;
use crate::canvas::Canvas;
use crate::config::{AnimationConfig, ResolvedConfig};
use crate::counts::Counts;
use crate::device::Layout;
use crate::error::{AnimError, AnimResult};
use crate::gif::GifWriter;
use crate::render::{FrameRenderer, GateRenderer, XrayRenderer};
use crate::shots::{DEFAULT_SHOT_CAP, compact, expand};

/// Called after each rendered frame with `(frames_done, frames_total)`.
pub type ProgressFn<'a> = Box<dyn FnMut(usize, usize) + 'a>;

/// Renders shot animations for one configuration.
pub struct Animator<'a> {
    config: ResolvedConfig,
    shot_cap: u64,
    progress: Option<ProgressFn<'a>>,
}

/// Frames prepared for a set of counts.
struct Plan {
    renderer: Box<dyn FrameRenderer>,
    canvas: Canvas,
    frames: usize,
}

impl<'a> Animator<'a> {
    /// Validate `config` and create an animator.
    pub fn new(config: &AnimationConfig) -> AnimResult<Self> {
        Ok(Self::from_resolved(config.resolve()?))
    }

    /// Create an animator from an already resolved configuration.
    pub fn from_resolved(config: ResolvedConfig) -> Self {
        Self {
            config,
            shot_cap: DEFAULT_SHOT_CAP,
            progress: None,
        }
    }

    /// Change the ceiling on the number of frames.
    #[must_use]
    pub fn with_shot_cap(mut self, cap: u64) -> Self {
        self.shot_cap = cap.max(1);
        self
    }

    /// Load backgrounds from `assets` instead of the configured source.
    #[must_use]
    pub fn with_assets(mut self, assets: AssetStore) -> Self {
        self.config.assets = assets;
        self
    }

    /// Report progress after every frame.
    #[must_use]
    pub fn on_frame(mut self, callback: impl FnMut(usize, usize) + 'a) -> Self {
        self.progress = Some(Box::new(callback));
        self
    }

    /// The resolved configuration.
    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    /// Number of frames an animation of `counts` will have.
    pub fn frame_count(&self, counts: &Counts) -> u64 {
        compact(counts, self.shot_cap).total_shots()
    }

    /// Render all frames in memory.
    pub fn render_frames(&mut self, counts: &Counts) -> AnimResult<Vec<RgbaImage>> {
        let mut plan = self.plan(counts)?;
        let mut rng = self.rng();
        let mut frames = Vec::with_capacity(plan.frames);
        for frame in 0..plan.frames {
            plan.renderer
                .render_frame(frame, &mut plan.canvas, rng.as_mut())?;
            frames.push(plan.canvas.to_rgba_image());
            self.report(frame + 1, plan.frames);
        }
        Ok(frames)
    }

    /// Render and save the animation to the configured output path.
    ///
    /// Invalid input is returned as an error before the file is touched.
    /// Frames are written to a temporary file next to the output, which
    /// replaces the output only once the GIF is complete. Failures while
    /// encoding or writing are logged, an existing output is left as it was
    /// and `Ok(false)` is returned. A read-only output is never replaced.
    pub fn save(&mut self, counts: &Counts) -> AnimResult<bool> {
        let mut plan = self.plan(counts)?;
        let output = self.config.output.clone();
        info!(
            output = %output.display(),
            layout = %self.config.layout,
            device = self.config.device.map_or("-", |d| d.name),
            frames = plan.frames,
            fps = self.config.fps,
            "saving shot animation"
        );

        match self.encode(&mut plan, &output) {
            Ok(written) => {
                info!(frames = written, output = %output.display(), "animation saved");
                Ok(true)
            }
            Err(e) => {
                error!(output = %output.display(), error = %e, "could not create/save animation");
                Ok(false)
            }
        }
    }

    fn encode(&mut self, plan: &mut Plan, output: &Path) -> AnimResult<usize> {
        let permissions = match fs::metadata(output) {
            Ok(meta) if meta.permissions().readonly() => {
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    "output file is read-only",
                )
                .into());
            }
            Ok(meta) => Some(meta.permissions()),
            Err(_) => None,
        };

        let mut temp = tempfile::Builder::new()
            .prefix(".shotflash-")
            .suffix(".gif.tmp")
            .tempfile_in(output_dir(output))?;
        debug!(temp = %temp.path().display(), "writing frames");

        let written = match self.write_gif(plan, temp.as_file_mut(), permissions) {
            Ok(written) => written,
            Err(e) => {
                discard(temp);
                return Err(e);
            }
        };
        if let Err(e) = temp.persist(output) {
            discard(e.file);
            return Err(e.error.into());
        }
        Ok(written)
    }

    fn write_gif(
        &mut self,
        plan: &mut Plan,
        file: &mut File,
        permissions: Option<Permissions>,
    ) -> AnimResult<usize> {
        match permissions {
            Some(permissions) => file.set_permissions(permissions)?,
            None => set_default_permissions(file)?,
        }

        let mut out = BufWriter::new(file);
        let mut rng = self.rng();
        let written = {
            let mut writer = GifWriter::new(&mut out, self.config.fps)?;
            for frame in 0..plan.frames {
                plan.renderer
                    .render_frame(frame, &mut plan.canvas, rng.as_mut())?;
                writer.push(plan.canvas.to_rgba_image())?;
                self.report(frame + 1, plan.frames);
            }
            writer.finish()
        };
        out.flush()?;
        Ok(written)
    }

    fn plan(&self, counts: &Counts) -> AnimResult<Plan> {
        let width = counts.validate()?;
        if counts.total_shots() == 0 {
            return Err(AnimError::EmptyCounts);
        }
        let capacity = self.config.capacity();
        if width > capacity {
            return Err(AnimError::UnsupportedQubitCount {
                required: width,
                capacity,
            });
        }

        let size = self.config.canvas_size()?;
        let compacted = compact(counts, self.shot_cap);
        let shots = expand(&compacted);
        debug!(
            original = counts.total_shots(),
            compacted = shots.len(),
            width,
            "reconstructed shots"
        );

        let background = self.config.assets.background(
            self.config.device,
            self.config.layout,
            self.config.labelled,
            size,
        )?;
        let frames = shots.len();
        let renderer: Box<dyn FrameRenderer> = match (self.config.layout, self.config.device) {
            (Layout::Gate, Some(device)) => Box::new(GateRenderer::new(
                device,
                shots,
                background,
                self.config.style,
                self.config.playback,
            )?),
            (Layout::Gate, None) => return Err(AnimError::MissingDeviceForGateMode),
            (Layout::Xray, _) => Box::new(XrayRenderer::new(
                shots,
                background,
                self.config.style,
                self.config.playback,
            )?),
        };

        Ok(Plan {
            canvas: Canvas::new(size)?,
            renderer,
            frames,
        })
    }

    fn rng(&self) -> Box<dyn RngCore> {
        match self.config.seed {
            Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
            None => Box::new(rand::thread_rng()),
        }
    }

    fn report(&mut self, done: usize, total: usize) {
        if let Some(progress) = self.progress.as_mut() {
            progress(done, total);
        }
    }
}

/// Directory the temporary GIF is written to.
fn output_dir(output: &Path) -> &Path {
    match output.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}

/// Remove a temporary file that will not become the output.
fn discard(temp: NamedTempFile) {
    let path = temp.path().to_path_buf();
    if let Err(e) = temp.close() {
        warn!(temp = %path.display(), error = %e, "could not remove temporary file");
    }
}

/// Give a new output the usual `rw-r--r--` mode instead of the private
/// mode temporary files are created with.
#[cfg(unix)]
fn set_default_permissions(file: &File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_default_permissions(_file: &File) -> io::Result<()> {
    Ok(())
}

/// Render `counts` with `config` and save the animation.
///
/// Returns `Ok(true)` on success and `Ok(false)` when the file could not be
/// encoded or written; invalid input is an error.
pub fn save_quantum_animation(config: &AnimationConfig, counts: &Counts) -> AnimResult<bool> {
    Animator::new(config)?.save(counts)
}
