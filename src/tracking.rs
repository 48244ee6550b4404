use morph_core::AnchorPose;
use std::cell::RefCell;
use std::rc::Rc;

/// Pose of the image target as reported by the tracking host.
#[derive(Clone, Copy, Debug, Default)]
pub struct Tracking {
    pub pose: AnchorPose,
    /// Set once the host has sent a matrix; before that the fallback camera is used.
    pub host_attached: bool,
}

impl Tracking {
    pub fn set_visible(&mut self, visible: bool) {
        self.pose.visible = visible;
    }

    pub fn set_model_view(&mut self, model_view: glam::Mat4) {
        self.pose.model_view = model_view;
        self.host_attached = true;
    }

    /// The pose to render with; visibility only counts once a matrix has arrived.
    pub fn effective_pose(&self) -> AnchorPose {
        let mut pose = self.pose;
        pose.visible &= self.host_attached;
        pose
    }

    /// Content follows the target once tracked; untracked pages show a preview.
    pub fn should_draw(&self) -> bool {
        !self.host_attached || self.pose.visible
    }
}

thread_local! {
    static TRACKING: Rc<RefCell<Tracking>> = Rc::new(RefCell::new(Tracking::default()));
}

pub fn shared() -> Rc<RefCell<Tracking>> {
    TRACKING.with(Rc::clone)
}
