//! First-person camera for navigating the 3D chart.
//!
//! The camera holds a position plus yaw/pitch angles. Mouse drags rotate it,
//! scrolling dollies along world Z, and held movement keys translate it once
//! per frame. The view matrix translates the world to the camera and then
//! applies yaw followed by pitch, so there is no roll.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_6};

use glam::{Mat3, Mat4, Vec3};

pub const DRAG_SENSITIVITY: f32 = 0.001;
pub const ZOOM_SPEED: f32 = 0.1;
/// World units per frame, not scaled by elapsed time.
pub const MOVE_SPEED: f32 = 0.1;
pub const MIN_ZOOM: f32 = 1.0;
pub const MAX_ZOOM: f32 = 50.0;
pub const PITCH_LIMIT: f32 = FRAC_PI_2;

pub const INITIAL_POSITION: Vec3 = Vec3::new(0.0, 2.0, 15.0);
pub const INITIAL_YAW: f32 = 0.0;
pub const INITIAL_PITCH: f32 = -FRAC_PI_6;

/// Direction of travel bound to a movement key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Movement {
    Forward,
    Backward,
    StrafeLeft,
    StrafeRight,
    Up,
    Down,
}

impl Movement {
    pub const ALL: [Movement; 6] = [
        Movement::Forward,
        Movement::Backward,
        Movement::StrafeLeft,
        Movement::StrafeRight,
        Movement::Up,
        Movement::Down,
    ];

    fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Snapshot of the movement keys currently held down.
///
/// Written by the input handler as key events arrive and read once per frame
/// by [`Camera::on_keys_held`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementKeys {
    bits: u8,
}

impl MovementKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, movement: Movement) {
        self.bits |= movement.bit();
    }

    pub fn release(&mut self, movement: Movement) {
        self.bits &= !movement.bit();
    }

    pub fn set(&mut self, movement: Movement, held: bool) {
        if held {
            self.press(movement);
        } else {
            self.release(movement);
        }
    }

    pub fn contains(&self, movement: Movement) -> bool {
        self.bits & movement.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn clear(&mut self) {
        self.bits = 0;
    }

    pub fn iter(&self) -> impl Iterator<Item = Movement> + '_ {
        Movement::ALL.into_iter().filter(move |m| self.contains(*m))
    }
}

impl FromIterator<Movement> for MovementKeys {
    fn from_iter<I: IntoIterator<Item = Movement>>(iter: I) -> Self {
        let mut keys = Self::new();
        for movement in iter {
            keys.press(movement);
        }
        keys
    }
}

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_y: FRAC_PI_3,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Projection {
    /// Right-handed perspective matrix with depth mapped to `[0, 1]`.
    pub fn matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, aspect, self.near, self.far)
    }
}

/// Tunable camera response.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSettings {
    pub drag_sensitivity: f32,
    pub zoom_speed: f32,
    pub move_speed: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub projection: Projection,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            drag_sensitivity: DRAG_SENSITIVITY,
            zoom_speed: ZOOM_SPEED,
            move_speed: MOVE_SPEED,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            projection: Projection::default(),
        }
    }
}

impl CameraSettings {
    /// Non-finite values fall back to the defaults; `max_zoom` is raised to at
    /// least `min_zoom`.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let finite_or = |value: f32, fallback: f32| if value.is_finite() { value } else { fallback };

        let min_zoom = finite_or(self.min_zoom, defaults.min_zoom);
        let max_zoom = finite_or(self.max_zoom, defaults.max_zoom).max(min_zoom);
        let projection = Projection {
            fov_y: finite_or(self.projection.fov_y, defaults.projection.fov_y),
            near: finite_or(self.projection.near, defaults.projection.near),
            far: finite_or(self.projection.far, defaults.projection.far),
        };

        Self {
            drag_sensitivity: finite_or(self.drag_sensitivity, defaults.drag_sensitivity),
            zoom_speed: finite_or(self.zoom_speed, defaults.zoom_speed),
            move_speed: finite_or(self.move_speed, defaults.move_speed),
            min_zoom,
            max_zoom,
            projection,
        }
    }
}

/// Camera position and orientation.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    /// Rotation about the vertical axis, unbounded.
    pub yaw: f32,
    /// Rotation about the horizontal axis, kept within `[-PI/2, PI/2]`.
    pub pitch: f32,
    pub settings: CameraSettings,
}

impl Camera {
    pub fn new() -> Self {
        Self::with_settings(CameraSettings::default())
    }

    pub fn with_settings(settings: CameraSettings) -> Self {
        Self {
            position: INITIAL_POSITION,
            yaw: INITIAL_YAW,
            pitch: INITIAL_PITCH,
            settings: settings.sanitized(),
        }
    }

    /// Return to the initial viewpoint, keeping the settings.
    pub fn reset(&mut self) {
        self.position = INITIAL_POSITION;
        self.yaw = INITIAL_YAW;
        self.pitch = INITIAL_PITCH;
    }

    /// Rotate by a mouse drag delta in screen pixels.
    ///
    /// Positive `dy` (dragging towards the bottom of the window) raises the pitch.
    pub fn on_drag(&mut self, dx: f32, dy: f32) {
        let sensitivity = self.settings.drag_sensitivity;
        self.yaw += dx * sensitivity;
        self.pitch = (self.pitch + dy * sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Dolly along world Z by a scroll delta.
    pub fn on_scroll(&mut self, dy: f32) {
        let z = self.position.z + dy * self.settings.zoom_speed;
        self.position.z = z.clamp(self.settings.min_zoom, self.settings.max_zoom);
    }

    /// Apply one frame of movement for the held keys.
    ///
    /// Horizontal directions follow yaw only. Combined keys add up without
    /// renormalization, so diagonal travel is faster than axis-aligned travel.
    pub fn on_keys_held(&mut self, keys: &MovementKeys) {
        if keys.is_empty() {
            return;
        }

        let speed = self.settings.move_speed;
        let forward = self.forward();
        let right = self.right();

        for movement in keys.iter() {
            match movement {
                Movement::Forward => self.position += forward * speed,
                Movement::Backward => self.position -= forward * speed,
                Movement::StrafeRight => self.position += right * speed,
                Movement::StrafeLeft => self.position -= right * speed,
                Movement::Up => self.position.y += speed,
                Movement::Down => self.position.y -= speed,
            }
        }
    }

    /// World forward `(0, 0, -1)` rotated by yaw, flattened onto the ground plane.
    pub fn forward(&self) -> Vec3 {
        self.yaw_direction(Vec3::NEG_Z)
    }

    /// World right `(1, 0, 0)` rotated by yaw, flattened onto the ground plane.
    pub fn right(&self) -> Vec3 {
        self.yaw_direction(Vec3::X)
    }

    fn yaw_direction(&self, axis: Vec3) -> Vec3 {
        let rotated = Mat3::from_rotation_y(self.yaw) * axis;
        Vec3::new(rotated.x, 0.0, rotated.z).normalize()
    }

    /// `R_x(pitch) * R_y(yaw) * T(-position)`.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_x(self.pitch)
            * Mat4::from_rotation_y(self.yaw)
            * Mat4::from_translation(-self.position)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        self.settings.projection.matrix(aspect)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

/// GPU-compatible camera uniform.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    view: [[f32; 4]; 4],
    projection: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        Self {
            view: Mat4::IDENTITY.to_cols_array_2d(),
            projection: Mat4::IDENTITY.to_cols_array_2d(),
        }
    }

    pub fn update_view_proj(&mut self, camera: &Camera, aspect: f32) {
        self.view = camera.view_matrix().to_cols_array_2d();
        self.projection = camera.projection_matrix(aspect).to_cols_array_2d();
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}
