//! A running grid session: surface, camera, grid and input state together.

use crate::config::CircuitOptions;
use circuitgrid_core::{GridModel, GridResult, InteractionOptions, InteractionState, PointerEvent, Viewport};
use circuitgrid_render::{Drawable, GridRenderer, RenderContext, Surface};
use peniko::Color;

/// Grid session bound to one host element.
pub struct Circuit<E: Drawable> {
    surface: Surface<E>,
    viewport: Viewport,
    grid: GridModel,
    renderer: GridRenderer,
    interaction: InteractionState,
    background: Color,
    destroyed: bool,
}

impl<E: Drawable> Circuit<E> {
    /// Validate the options, size the surface and apply the initial camera.
    pub fn new(element: E, options: &CircuitOptions) -> GridResult<Self> {
        let grid = options.grid.model();
        grid.validate()?;

        let surface = Surface::new(element)?;

        let mut viewport = Viewport::new();
        if let Some(offset) = options.viewport.offset {
            viewport.set_offset(offset);
        }
        if let Some(zoom) = options.viewport.zoom {
            viewport.set_zoom(zoom);
        }

        log::debug!(
            "circuit created: {}x{} @ {}, spacing {}, zoom {}",
            surface.width(),
            surface.height(),
            surface.device_pixel_ratio(),
            grid.spacing(),
            viewport.zoom()
        );

        Ok(Self {
            surface,
            viewport,
            grid,
            renderer: GridRenderer::new(options.grid.style),
            interaction: InteractionState::new(options.interaction),
            background: options.canvas.background_color.into(),
            destroyed: false,
        })
    }

    /// Draw one full frame: clear, background, grid.
    pub fn render_once(&mut self) -> GridResult<()> {
        if self.destroyed {
            return Ok(());
        }
        self.surface.clear();
        self.surface.fill(self.background);
        self.renderer
            .render(&mut self.surface, &RenderContext::new(&self.viewport, &self.grid))
    }

    /// Pick up a new host size or pixel ratio.
    pub fn resize(&mut self) {
        if !self.destroyed {
            self.surface.resize();
        }
    }

    /// Feed a pointer event through the interaction state.
    /// Returns whether the viewport moved.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        if self.destroyed {
            return false;
        }
        self.interaction.handle_pointer_event(event, &mut self.viewport)
    }

    /// Stop responding to input and rendering. Safe to call repeatedly.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        log::debug!("circuit destroyed");
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn interaction_options(&self) -> InteractionOptions {
        self.interaction.options()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    /// Swap the grid. Invalid grids are rejected and the old one kept.
    pub fn set_grid(&mut self, grid: GridModel) -> GridResult<()> {
        grid.validate()?;
        self.grid = grid;
        Ok(())
    }

    pub fn renderer(&self) -> &GridRenderer {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut GridRenderer {
        &mut self.renderer
    }

    pub fn surface(&self) -> &Surface<E> {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut Surface<E> {
        &mut self.surface
    }

    /// Tear down and hand the element back.
    pub fn into_element(mut self) -> E {
        self.destroy();
        self.surface.into_element()
    }
}
