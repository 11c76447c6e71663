use crate::foundation::core::{Affine, BezPath};
use crate::foundation::error::{AviaryError, AviaryResult};
use crate::synth::shapes::DrawOp;

/// A rendered RGBA8 raster, row-major, premultiplied alpha.
#[derive(Clone, Debug, PartialEq)]
pub struct Raster {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Premultiplied RGBA8 bytes, tightly packed.
    pub data: Vec<u8>,
}

impl Raster {
    /// Premultiplied RGBA of pixel `(x, y)`, or transparent when out of range.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        if x >= self.width || y >= self.height {
            return [0, 0, 0, 0];
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Copy out the sub-rectangle `(x, y, w, h)` as its own raster.
    pub fn crop(&self, x: u32, y: u32, w: u32, h: u32) -> Raster {
        let mut data = Vec::with_capacity((w as usize) * (h as usize) * 4);
        for row in y..y.saturating_add(h) {
            for col in x..x.saturating_add(w) {
                data.extend_from_slice(&self.pixel(col, row));
            }
        }
        Raster {
            width: w,
            height: h,
            data,
        }
    }

    /// Number of pixels with non-zero alpha.
    pub fn coverage(&self) -> usize {
        self.data.chunks_exact(4).filter(|px| px[3] != 0).count()
    }

    /// Undo premultiplication, e.g. for PNG output.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }
}

/// A primitive plus the affine placing it in the target raster.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedOp {
    /// Local-to-raster transform.
    pub transform: Affine,
    /// Primitive in local coordinates.
    pub op: DrawOp,
}

/// Drawing surface the synthesizer composites frames onto.
pub trait RasterBackend {
    /// Rasterize `ops` in order onto a fresh transparent `width` x `height` raster.
    fn rasterize(&mut self, width: u32, height: u32, ops: &[PlacedOp]) -> AviaryResult<Raster>;
}

/// Available backend kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// CPU rasterizer powered by `vello_cpu`.
    Cpu,
    /// No rasterizer; every request fails with a synthesis error.
    Disabled,
}

/// Create a raster backend.
pub fn create_backend(kind: BackendKind) -> Box<dyn RasterBackend> {
    match kind {
        BackendKind::Cpu => Box::new(CpuRasterBackend::new()),
        BackendKind::Disabled => Box::new(DisabledBackend),
    }
}

/// CPU raster backend.
#[derive(Default)]
pub struct CpuRasterBackend {
    ctx: Option<vello_cpu::RenderContext>,
}

impl CpuRasterBackend {
    /// New backend; the render context is created lazily.
    pub fn new() -> Self {
        Self::default()
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut vello_cpu::RenderContext) -> AviaryResult<R>,
    ) -> AviaryResult<R> {
        let mut ctx = match self.ctx.take() {
            None => vello_cpu::RenderContext::new(width, height),
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            Some(_) => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(&mut ctx)?;
        self.ctx = Some(ctx);
        Ok(out)
    }
}

impl RasterBackend for CpuRasterBackend {
    fn rasterize(&mut self, width: u32, height: u32, ops: &[PlacedOp]) -> AviaryResult<Raster> {
        if width == 0 || height == 0 {
            return Err(AviaryError::synthesis("raster must be at least 1x1"));
        }
        let w: u16 = width
            .try_into()
            .map_err(|_| AviaryError::synthesis(format!("raster width {width} exceeds u16")))?;
        let h: u16 = height
            .try_into()
            .map_err(|_| AviaryError::synthesis(format!("raster height {height} exceeds u16")))?;

        self.with_ctx_mut(w, h, |ctx| {
            for placed in ops {
                let c = placed.op.color();
                if c.a == 0 {
                    continue;
                }
                ctx.set_transform(affine_to_cpu(placed.transform));
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a));
                let path = bezpath_to_cpu(&placed.op.to_path());
                match &placed.op {
                    DrawOp::StrokePolyline { width, .. } => {
                        ctx.set_stroke(vello_cpu::kurbo::Stroke::new(*width));
                        ctx.stroke_path(&path);
                    }
                    _ => ctx.fill_path(&path),
                }
            }

            let mut pixmap = vello_cpu::Pixmap::new(w, h);
            ctx.flush();
            ctx.render_to_pixmap(&mut pixmap);
            Ok(Raster {
                width,
                height,
                data: pixmap.data_as_u8_slice().to_vec(),
            })
        })
    }
}

/// Backend standing in for a host without a drawing surface.
#[derive(Clone, Copy, Debug, Default)]
pub struct DisabledBackend;

impl RasterBackend for DisabledBackend {
    fn rasterize(&mut self, _width: u32, _height: u32, _ops: &[PlacedOp]) -> AviaryResult<Raster> {
        Err(AviaryError::synthesis("raster backend is disabled"))
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/synth/raster.rs"]
mod tests;
