//! Photo panels hung in the scattered cloud, and the focused viewer.
//!
//! Pixels live on the host side; the core only tracks which texture handle
//! and dimensions a photo source resolved to.

use crate::animate::{select, Approach, Smoothed};
use crate::camera::Camera;
use crate::config::SmoothingRates;
use crate::constants::*;
use crate::geometry::{chaos_position, tree_position};
use crate::instance::PhotoQuad;
use crate::tree::AutoRotate;
use fnv::FnvHashMap;
use glam::Vec3;
use rand::Rng;
use thiserror::Error;

/// Host texture id, assigned by whoever uploads the pixels.
pub type TextureHandle = u32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhotoAsset {
    pub width: u32,
    pub height: u32,
    pub texture: TextureHandle,
}

impl PhotoAsset {
    pub fn aspect(&self) -> f32 {
        self.width.max(1) as f32 / self.height.max(1) as f32
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PhotoError {
    #[error("photo could not be decoded: {0}")]
    Decode(String),
    #[error("photo load belongs to a superseded gallery")]
    Stale,
}

/// One source the host still has to fetch and upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadRequest {
    pub generation: u64,
    pub index: usize,
    pub source: String,
}

#[derive(Clone, Debug)]
pub struct PhotoPanel {
    pub source: String,
    pub chaos: Vec3,
    pub target: Vec3,
    pub current: Vec3,
    pub opacity: f32,
    pub asset: Option<PhotoAsset>,
}

pub struct PhotoGallery {
    panels: Vec<PhotoPanel>,
    generation: u64,
    assets: FnvHashMap<String, PhotoAsset>,
    position_rate: f32,
    opacity_rate: f32,
}

impl PhotoGallery {
    pub fn new(rates: &SmoothingRates) -> Self {
        Self {
            panels: Vec::new(),
            generation: 0,
            assets: FnvHashMap::default(),
            position_rate: rates.photo_position,
            opacity_rate: rates.photo_opacity,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn panels(&self) -> &[PhotoPanel] {
        &self.panels
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Sync panels with a new photo list.
    ///
    /// A panel whose index still holds the same source keeps its scatter
    /// point, position and opacity; only its tree slot moves with the new
    /// total. Sources already in the asset table resolve immediately; the rest
    /// are returned for the host to load and report back through
    /// [`Self::resolve`].
    pub fn set_photos<R: Rng + ?Sized>(
        &mut self,
        photos: &[String],
        rng: &mut R,
    ) -> Vec<LoadRequest> {
        self.generation += 1;
        let n = photos.len();
        let mut previous = std::mem::take(&mut self.panels).into_iter();
        self.panels = photos
            .iter()
            .enumerate()
            .map(|(i, source)| {
                let target = tree_position(i, n, PHOTO_TREE_HEIGHT, PHOTO_BASE_RADIUS);
                match previous.next() {
                    Some(mut kept) if kept.source == *source => {
                        kept.target = target;
                        kept.asset = kept.asset.or_else(|| self.assets.get(source).copied());
                        kept
                    }
                    _ => {
                        let chaos = chaos_position(PHOTO_CHAOS_RADIUS, rng);
                        PhotoPanel {
                            source: source.clone(),
                            chaos,
                            target,
                            current: chaos,
                            opacity: 0.0,
                            asset: self.assets.get(source).copied(),
                        }
                    }
                }
            })
            .collect();

        let generation = self.generation;
        self.panels
            .iter()
            .enumerate()
            .filter(|(_, p)| p.asset.is_none())
            .map(|(index, p)| LoadRequest {
                generation,
                index,
                source: p.source.clone(),
            })
            .collect()
    }

    /// Report the outcome of a load started for `generation`.
    pub fn resolve(
        &mut self,
        generation: u64,
        index: usize,
        result: Result<PhotoAsset, PhotoError>,
    ) -> Result<(), PhotoError> {
        if generation != self.generation {
            log::debug!(
                "[photos] dropping load {generation}:{index}, gallery is at {}",
                self.generation
            );
            return Err(PhotoError::Stale);
        }
        let Some(panel) = self.panels.get_mut(index) else {
            return Err(PhotoError::Stale);
        };
        match result {
            Ok(asset) => {
                self.assets.insert(panel.source.clone(), asset);
                panel.asset = Some(asset);
                Ok(())
            }
            Err(err) => {
                log::warn!("[photos] {} failed to load: {err}", panel.source);
                Err(err)
            }
        }
    }

    pub fn asset(&self, index: usize) -> Option<PhotoAsset> {
        self.panels.get(index).and_then(|p| p.asset)
    }

    pub fn cached(&self, source: &str) -> Option<PhotoAsset> {
        self.assets.get(source).copied()
    }

    pub fn update(&mut self, formed: bool, hand_open: bool) {
        let opacity_goal = if hand_open && !formed {
            PHOTO_CHAOS_OPACITY
        } else {
            0.0
        };
        for p in &mut self.panels {
            p.current = p
                .current
                .approach(select(formed, p.target, p.chaos), self.position_rate);
            p.opacity = p.opacity.approach(opacity_goal, self.opacity_rate);
        }
    }

    pub fn emit(&self, group: &AutoRotate, out: &mut Vec<PhotoQuad>) {
        for p in &self.panels {
            let Some(asset) = p.asset else {
                continue;
            };
            out.push(PhotoQuad {
                texture: asset.texture,
                position: group.apply(p.current),
                width: PHOTO_PANEL_WIDTH,
                height: PHOTO_PANEL_WIDTH / asset.aspect(),
                opacity: p.opacity,
                overlay: false,
            });
        }
    }
}

/// Enlarged copy of the focused photo floating in front of the camera.
pub struct FocusedViewer {
    pub position: Smoothed<Vec3>,
    pub scale: Smoothed<f32>,
    pub opacity: Smoothed<f32>,
    shown: Option<PhotoAsset>,
}

impl FocusedViewer {
    pub fn new(rate: f32) -> Self {
        Self {
            position: Smoothed::new(CAMERA_EYE, rate),
            scale: Smoothed::new(VIEWER_SCALE_HIDDEN, rate),
            opacity: Smoothed::new(0.0, rate),
            shown: None,
        }
    }

    /// `asset` is the focused photo's resolved asset, `None` when unfocused
    /// or still loading. The last shown texture is kept while fading out.
    pub fn update(
        &mut self,
        hand_open: bool,
        asset: Option<PhotoAsset>,
        camera: &Camera,
        viewport_width: f32,
    ) {
        let visible = hand_open && asset.is_some();
        if visible {
            self.shown = asset;
        }
        let scale_goal = match (visible, viewport_width <= MOBILE_MAX_WIDTH_PX) {
            (false, _) => VIEWER_SCALE_HIDDEN,
            (true, true) => VIEWER_SCALE_MOBILE,
            (true, false) => VIEWER_SCALE_DESKTOP,
        };
        self.scale.step(scale_goal);
        self.position
            .step(camera.eye + camera.forward() * VIEWER_DISTANCE);
        self.opacity.step(if visible { 1.0 } else { 0.0 });
    }

    pub fn is_visible(&self) -> bool {
        self.shown.is_some() && self.opacity.value > 1e-3
    }

    pub fn quad(&self) -> Option<PhotoQuad> {
        let asset = self.shown?;
        Some(PhotoQuad {
            texture: asset.texture,
            position: self.position.value,
            width: self.scale.value,
            height: self.scale.value / asset.aspect(),
            opacity: self.opacity.value,
            overlay: true,
        })
    }
}
