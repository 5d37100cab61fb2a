//! Scene-side state shared with the web frontend.
//!
//! These types avoid referencing platform-specific APIs. The web frontend
//! reads them every frame to build camera matrices and per-object model
//! matrices; the tween engine writes them.

use crate::constants::*;
use glam::{EulerRot, Mat4, Quat, Vec3};

/// Build a rotation from Euler angles applied in X, Y, Z order.
#[inline]
pub fn euler_quat(rotation: Vec3) -> Quat {
    Quat::from_euler(EulerRot::XYZ, rotation.x, rotation.y, rotation.z)
}

/// Position, Euler rotation (radians, XYZ order) and per-axis scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, euler_quat(self.rotation), self.position)
    }
}

/// Right-handed perspective camera positioned by Euler rotation.
#[derive(Clone, Debug)]
pub struct Camera {
    pub position: Vec3,
    pub rotation: Vec3,
    pub fovy_degrees: f32,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        Self {
            position: CAMERA_START,
            rotation: Vec3::ZERO,
            fovy_degrees: CAMERA_FOVY_DEGREES,
            aspect: sanitize_aspect(aspect),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }

    pub fn fovy_radians(&self) -> f32 {
        self.fovy_degrees.to_radians()
    }

    /// Camera-to-world transform.
    pub fn world_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(euler_quat(self.rotation), self.position)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        self.world_matrix().inverse()
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians(), self.aspect, self.znear, self.zfar)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Aspect ratios from zero-sized canvases are replaced by 1.
#[inline]
pub fn sanitize_aspect(aspect: f32) -> f32 {
    if aspect.is_finite() && aspect > 0.0 {
        aspect
    } else {
        1.0
    }
}

/// Texture currently shown on the letter box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Face {
    Envelope,
    Letter,
}

#[derive(Clone, Debug)]
pub struct Letter {
    pub transform: Transform,
    pub face: Face,
    pub spinning: bool,
}

impl Default for Letter {
    fn default() -> Self {
        Self {
            transform: Transform {
                rotation: LETTER_START_ROTATION,
                ..Transform::default()
            },
            face: Face::Envelope,
            spinning: true,
        }
    }
}

/// One heart of the burst; position is relative to the burst group.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    pub opacity: f32,
    pub visible: bool,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            opacity: 1.0,
            visible: true,
        }
    }
}

#[derive(Clone, Debug)]
pub struct HeartBurst {
    pub rotation: Vec3,
    pub particles: Vec<Particle>,
}

impl HeartBurst {
    pub fn group_matrix(&self) -> Mat4 {
        Mat4::from_quat(euler_quat(self.rotation))
    }

    /// World-space model matrix of particle `index`.
    pub fn particle_matrix(&self, index: usize) -> Option<Mat4> {
        self.particles.get(index).map(|p| {
            self.group_matrix()
                * Mat4::from_translation(p.position)
                * Mat4::from_scale(Vec3::new(PARTICLE_SIZE, PARTICLE_SIZE, 1.0))
        })
    }

    pub fn visible_count(&self) -> usize {
        self.particles.iter().filter(|p| p.visible).count()
    }
}

#[derive(Clone, Debug)]
pub struct Scene {
    pub camera: Camera,
    pub letter: Letter,
    pub burst: Option<HeartBurst>,
    initial_camera: (Vec3, Vec3),
}

impl Scene {
    pub fn new(aspect: f32) -> Self {
        let camera = Camera::new(aspect);
        let initial_camera = (camera.position, camera.rotation);
        Self {
            camera,
            letter: Letter::default(),
            burst: None,
            initial_camera,
        }
    }

    /// Camera position and rotation at construction.
    pub fn initial_camera(&self) -> (Vec3, Vec3) {
        self.initial_camera
    }
}
