//! The native view abstraction a bridge wraps.

use std::path::Path;

use tabview_common::{BridgeError, Rect, Result};
use url::Url;

use crate::observation::ObservationQueue;
use crate::property::{ObservedProperty, PropertySource};
use crate::script::{RejectedScript, ScriptCompletion};

/// A toolkit webview as seen by a bridge.
///
/// All methods run on the UI thread. Engines do the real work; an
/// implementation only translates calls and reports property changes to
/// the queue given in [`NativeView::subscribe`].
pub trait NativeView: PropertySource {
    /// Start reporting changes of `properties` to `queue`, each with the
    /// value it changed to.
    fn subscribe(&mut self, properties: &[ObservedProperty], queue: ObservationQueue)
        -> Result<()>;

    /// Stop reporting changes of `properties`.
    fn unsubscribe(&mut self, properties: &[ObservedProperty]);

    fn load_url(&mut self, url: &Url) -> Result<()>;

    /// Replace the content with inline markup, no base URL.
    fn load_html(&mut self, html: &str) -> Result<()>;

    /// Load a local file. The caller has already checked that `file` lies
    /// inside `read_access_root`.
    fn load_file(&mut self, file: &Path, read_access_root: &Path) -> Result<()>;

    fn evaluate_script(&mut self, js: &str) -> Result<()>;

    /// Evaluate `js` and finish `completion` once the engine reports back.
    ///
    /// If the engine refuses the script, the completion is handed back
    /// unfinished so the caller can report the error through it.
    fn evaluate_script_with_completion(
        &mut self,
        js: &str,
        completion: ScriptCompletion,
    ) -> std::result::Result<(), RejectedScript>;

    /// Move/resize within the parent, in the toolkit's own coordinates.
    fn set_frame(&mut self, frame: Rect) -> Result<()>;

    fn go_back(&mut self) -> Result<()>;
    fn go_forward(&mut self) -> Result<()>;
    fn reload(&mut self) -> Result<()>;
    fn stop_loading(&mut self) -> Result<()>;

    fn set_scroll_bounce(&mut self, bounces: bool) -> Result<()>;

    /// Display scale the view renders at.
    fn scale_factor(&self) -> f64;

    /// Render the current contents into a bitmap at `scale`.
    fn render_snapshot(&self, scale: f64) -> Result<Snapshot>;
}

/// An RGBA8 bitmap of a view's contents.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub width: u32,
    pub height: u32,
    pub scale: f64,
    pub rgba: Vec<u8>,
}

impl Snapshot {
    /// Encode the bitmap as PNG.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let expected = self.width as usize * self.height as usize * 4;
        if self.rgba.len() != expected {
            return Err(BridgeError::Platform(format!(
                "snapshot buffer is {} bytes, expected {expected} for {}x{}",
                self.rgba.len(),
                self.width,
                self.height
            )));
        }

        let mut out = Vec::new();
        let mut encoder = png::Encoder::new(&mut out, self.width, self.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder
            .write_header()
            .map_err(|e| BridgeError::Platform(format!("png header: {e}")))?;
        writer
            .write_image_data(&self.rgba)
            .map_err(|e| BridgeError::Platform(format!("png data: {e}")))?;
        writer
            .finish()
            .map_err(|e| BridgeError::Platform(format!("png finish: {e}")))?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    #[test]
    fn snapshot_encodes_png() {
        let snapshot = Snapshot {
            width: 2,
            height: 2,
            scale: 2.0,
            rgba: vec![255; 16],
        };
        let png = snapshot.to_png().unwrap();
        assert_eq!(&png[..8], &PNG_SIGNATURE);
    }

    #[test]
    fn snapshot_rejects_short_buffer() {
        let snapshot = Snapshot {
            width: 4,
            height: 4,
            scale: 1.0,
            rgba: vec![0; 10],
        };
        assert!(matches!(snapshot.to_png(), Err(BridgeError::Platform(_))));
    }
}
