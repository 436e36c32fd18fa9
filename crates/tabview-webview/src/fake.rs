//! In-memory native view for tests.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tabview_common::{BridgeError, Rect, Result};
use url::Url;

use crate::observation::ObservationQueue;
use crate::property::{ObservedProperty, PropertySource};
use crate::script::{RejectedScript, ScriptCompletion, ScriptOutcome};
use crate::view::{NativeView, Snapshot};

/// Everything the bridge asked the view to do, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Subscribe(Vec<ObservedProperty>),
    Unsubscribe(Vec<ObservedProperty>),
    LoadUrl(String),
    LoadHtml(String),
    LoadFile(PathBuf),
    EvaluateScript(String),
    EvaluateWithCompletion(String),
    SetFrame(Rect),
    GoBack,
    GoForward,
    Reload,
    StopLoading,
    SetScrollBounce(bool),
    Dropped,
}

pub type CallLog = Rc<RefCell<Vec<Call>>>;

pub struct FakeView {
    pub loading: bool,
    pub progress: f64,
    pub title: Option<String>,
    pub url: Option<String>,
    pub back: bool,
    pub forward: bool,
    pub frame: Rect,
    pub scale: f64,
    pub reject_scripts: bool,
    log: CallLog,
    observer: Option<ObservationQueue>,
    subscribed: Vec<ObservedProperty>,
    pending_scripts: Vec<ScriptCompletion>,
}

impl FakeView {
    pub fn new() -> Self {
        Self {
            loading: false,
            progress: 0.0,
            title: None,
            url: None,
            back: false,
            forward: false,
            frame: Rect::default(),
            scale: 2.0,
            reject_scripts: false,
            log: Rc::new(RefCell::new(Vec::new())),
            observer: None,
            subscribed: Vec::new(),
            pending_scripts: Vec::new(),
        }
    }

    /// Shared handle to the call log; outlives the view.
    pub fn log(&self) -> CallLog {
        Rc::clone(&self.log)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.log.borrow().clone()
    }

    pub fn is_subscribed(&self, property: ObservedProperty) -> bool {
        self.subscribed.contains(&property)
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
        self.changed(ObservedProperty::Loading);
    }

    pub fn set_progress(&mut self, progress: f64) {
        self.progress = progress;
        self.changed(ObservedProperty::EstimatedProgress);
    }

    pub fn set_title(&mut self, title: Option<&str>) {
        self.title = title.map(str::to_string);
        self.changed(ObservedProperty::Title);
    }

    pub fn set_url(&mut self, url: Option<&str>) {
        self.url = url.map(str::to_string);
        self.changed(ObservedProperty::Url);
    }

    pub fn set_can_go_back(&mut self, back: bool) {
        self.back = back;
        self.changed(ObservedProperty::CanGoBack);
    }

    pub fn set_can_go_forward(&mut self, forward: bool) {
        self.forward = forward;
        self.changed(ObservedProperty::CanGoForward);
    }

    pub fn pending_scripts(&self) -> usize {
        self.pending_scripts.len()
    }

    /// Finish the oldest pending callback evaluation.
    pub fn finish_script(&mut self, outcome: ScriptOutcome) {
        if !self.pending_scripts.is_empty() {
            self.pending_scripts.remove(0).complete(outcome);
        }
    }

    /// Hand the oldest pending completion to the test.
    pub fn take_script(&mut self) -> Option<ScriptCompletion> {
        if self.pending_scripts.is_empty() {
            None
        } else {
            Some(self.pending_scripts.remove(0))
        }
    }

    fn changed(&self, property: ObservedProperty) {
        if let Some(queue) = &self.observer {
            if self.subscribed.contains(&property) {
                queue.notify(property, property.observed_value(self));
            }
        }
    }

    fn record(&self, call: Call) {
        self.log.borrow_mut().push(call);
    }
}

impl PropertySource for FakeView {
    fn is_loading(&self) -> bool {
        self.loading
    }

    fn estimated_progress(&self) -> f64 {
        self.progress
    }

    fn title(&self) -> Option<String> {
        self.title.clone()
    }

    fn url(&self) -> Option<String> {
        self.url.clone()
    }

    fn can_go_back(&self) -> bool {
        self.back
    }

    fn can_go_forward(&self) -> bool {
        self.forward
    }
}

impl NativeView for FakeView {
    fn subscribe(&mut self, properties: &[ObservedProperty], queue: ObservationQueue) -> Result<()> {
        self.record(Call::Subscribe(properties.to_vec()));
        self.subscribed.extend_from_slice(properties);
        self.observer = Some(queue);
        Ok(())
    }

    fn unsubscribe(&mut self, properties: &[ObservedProperty]) {
        self.record(Call::Unsubscribe(properties.to_vec()));
        self.subscribed.retain(|p| !properties.contains(p));
        if self.subscribed.is_empty() {
            self.observer = None;
        }
    }

    fn load_url(&mut self, url: &Url) -> Result<()> {
        self.record(Call::LoadUrl(url.to_string()));
        Ok(())
    }

    fn load_html(&mut self, html: &str) -> Result<()> {
        self.record(Call::LoadHtml(html.to_string()));
        Ok(())
    }

    fn load_file(&mut self, file: &Path, _read_access_root: &Path) -> Result<()> {
        self.record(Call::LoadFile(file.to_path_buf()));
        Ok(())
    }

    fn evaluate_script(&mut self, js: &str) -> Result<()> {
        self.record(Call::EvaluateScript(js.to_string()));
        Ok(())
    }

    fn evaluate_script_with_completion(
        &mut self,
        js: &str,
        completion: ScriptCompletion,
    ) -> std::result::Result<(), RejectedScript> {
        self.record(Call::EvaluateWithCompletion(js.to_string()));
        if self.reject_scripts {
            return Err(RejectedScript::new(
                BridgeError::Evaluation("engine refused script".into()),
                completion,
            ));
        }
        self.pending_scripts.push(completion);
        Ok(())
    }

    fn set_frame(&mut self, frame: Rect) -> Result<()> {
        self.record(Call::SetFrame(frame));
        self.frame = frame;
        Ok(())
    }

    fn go_back(&mut self) -> Result<()> {
        self.record(Call::GoBack);
        Ok(())
    }

    fn go_forward(&mut self) -> Result<()> {
        self.record(Call::GoForward);
        Ok(())
    }

    fn reload(&mut self) -> Result<()> {
        self.record(Call::Reload);
        Ok(())
    }

    fn stop_loading(&mut self) -> Result<()> {
        self.record(Call::StopLoading);
        Ok(())
    }

    fn set_scroll_bounce(&mut self, bounces: bool) -> Result<()> {
        self.record(Call::SetScrollBounce(bounces));
        Ok(())
    }

    fn scale_factor(&self) -> f64 {
        self.scale
    }

    fn render_snapshot(&self, scale: f64) -> Result<Snapshot> {
        let width = (self.frame.width * scale).round().max(1.0) as u32;
        let height = (self.frame.height * scale).round().max(1.0) as u32;
        Ok(Snapshot {
            width,
            height,
            scale,
            rgba: vec![255; width as usize * height as usize * 4],
        })
    }
}

impl Drop for FakeView {
    fn drop(&mut self) {
        self.record(Call::Dropped);
    }
}
