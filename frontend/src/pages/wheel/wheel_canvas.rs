use yew::prelude::*;
use web_sys::{window, CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};
use wasm_bindgen::JsCast;
use std::f64::consts::{PI, TAU};
use wheel_shared::wheel::{GradientStops, WheelGeometry, WheelSurface};

const DIVIDER_WIDTH: f64 = 2.5;
const POINTER_DEPTH: f64 = 28.0;
const POINTER_HALF_WIDTH: f64 = 14.0;

fn is_dark_mode() -> bool {
    window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
        .map(|el| el.class_list().contains("dark"))
        .unwrap_or(false)
}

/// A `WheelSurface` backed by a 2-D canvas context.
pub struct CanvasSurface {
    context: CanvasRenderingContext2d,
    width: f64,
    height: f64,
    center_image: Option<HtmlImageElement>,
}

impl CanvasSurface {
    /// `None` when the node is not mounted or has no 2-D context.
    pub fn from_node(node: &NodeRef, center_image: Option<HtmlImageElement>) -> Option<Self> {
        let canvas = node.cast::<HtmlCanvasElement>()?;
        let context = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;

        Some(Self {
            width: canvas.width() as f64,
            height: canvas.height() as f64,
            context,
            center_image,
        })
    }

    fn gradient_fill(&self, geometry: &WheelGeometry, radius: f64, fill: &GradientStops) {
        match self.context.create_radial_gradient(
            geometry.center_x,
            geometry.center_y,
            0.0,
            geometry.center_x,
            geometry.center_y,
            radius,
        ) {
            Ok(gradient) => {
                let _ = gradient.add_color_stop(0.0, &fill.inner);
                let _ = gradient.add_color_stop(1.0, &fill.outer);
                self.context.set_fill_style_canvas_gradient(&gradient);
            }
            Err(_) => self.context.set_fill_style_str(&fill.outer),
        }
    }
}

impl WheelSurface for CanvasSurface {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        let context = &self.context;
        context.clear_rect(0.0, 0.0, self.width, self.height);

        // Soft backdrop glow behind the rim
        let geometry = WheelGeometry::fit(self.width, self.height);
        context.begin_path();
        if is_dark_mode() {
            context.set_fill_style_str("rgba(130, 100, 255, 0.15)");
        } else {
            context.set_fill_style_str("rgba(100, 130, 255, 0.15)");
        }
        let _ = context.arc(geometry.center_x, geometry.center_y, geometry.radius + 15.0, 0.0, TAU);
        context.fill();
    }

    fn set_transform(&mut self, geometry: &WheelGeometry, tilt: f64, scale: f64) {
        let context = &self.context;
        context.save();
        let _ = context.translate(geometry.center_x, geometry.center_y);
        // tilt squashes one axis to fake a wobble in depth
        let _ = context.scale(scale, scale * tilt.cos());
        let _ = context.translate(-geometry.center_x, -geometry.center_y);
    }

    fn reset_transform(&mut self) {
        self.context.restore();
    }

    fn fill_sector(&mut self, geometry: &WheelGeometry, start: f64, end: f64, fill: &GradientStops) {
        self.gradient_fill(geometry, geometry.radius, fill);
        let context = &self.context;
        context.begin_path();
        context.move_to(geometry.center_x, geometry.center_y);
        let _ = context.arc(geometry.center_x, geometry.center_y, geometry.radius, start, end);
        context.close_path();
        context.fill();
    }

    fn stroke_divider(&mut self, geometry: &WheelGeometry, angle: f64) {
        let context = &self.context;
        let (end_x, end_y) = geometry.point_at(angle, 1.0);
        context.begin_path();
        context.set_stroke_style_str(if is_dark_mode() {
            "rgba(255, 255, 255, 0.7)"
        } else {
            "rgba(255, 255, 255, 0.9)"
        });
        context.set_line_width(DIVIDER_WIDTH);
        context.move_to(geometry.center_x, geometry.center_y);
        context.line_to(end_x, end_y);
        context.stroke();
    }

    fn draw_label(&mut self, text: &str, x: f64, y: f64, rotation: f64, max_width: f64) {
        let context = &self.context;
        context.save();
        let _ = context.translate(x, y);
        let _ = context.rotate(rotation);
        context.set_font("bold 15px system-ui, sans-serif");
        context.set_text_align("center");
        context.set_text_baseline("middle");
        context.set_shadow_color("rgba(0, 0, 0, 0.45)");
        context.set_shadow_blur(4.0);
        context.set_fill_style_str("#ffffff");
        let _ = context.fill_text_with_max_width(text, 0.0, 0.0, max_width);
        context.restore();
    }

    fn fill_medallion(&mut self, geometry: &WheelGeometry, radius: f64, fill: &GradientStops) {
        self.gradient_fill(geometry, radius, fill);
        let context = &self.context;
        context.begin_path();
        let _ = context.arc(geometry.center_x, geometry.center_y, radius, 0.0, TAU);
        context.fill();

        context.set_stroke_style_str("rgba(255, 255, 255, 0.8)");
        context.set_line_width(3.0);
        context.stroke();
    }

    fn draw_center_image(&mut self, geometry: &WheelGeometry, radius: f64) -> bool {
        let image = match &self.center_image {
            Some(image) if image.complete() && image.natural_width() > 0 => image,
            _ => return false,
        };

        let context = &self.context;
        context.save();
        context.begin_path();
        let _ = context.arc(geometry.center_x, geometry.center_y, radius, 0.0, TAU);
        context.clip();
        let drawn = context
            .draw_image_with_html_image_element_and_dw_and_dh(
                image,
                geometry.center_x - radius,
                geometry.center_y - radius,
                radius * 2.0,
                radius * 2.0,
            )
            .is_ok();
        context.restore();
        drawn
    }

    fn draw_pointer(&mut self, geometry: &WheelGeometry, angle: f64) {
        let context = &self.context;
        let (dir_x, dir_y) = (angle.cos(), angle.sin());
        let (perp_x, perp_y) = (-dir_y, dir_x);

        let tip_x = geometry.center_x + (geometry.radius - POINTER_DEPTH * 0.5) * dir_x;
        let tip_y = geometry.center_y + (geometry.radius - POINTER_DEPTH * 0.5) * dir_y;
        let base_x = geometry.center_x + (geometry.radius + POINTER_DEPTH * 0.5) * dir_x;
        let base_y = geometry.center_y + (geometry.radius + POINTER_DEPTH * 0.5) * dir_y;

        context.begin_path();
        context.move_to(tip_x, tip_y);
        context.line_to(base_x + perp_x * POINTER_HALF_WIDTH, base_y + perp_y * POINTER_HALF_WIDTH);
        context.line_to(base_x - perp_x * POINTER_HALF_WIDTH, base_y - perp_y * POINTER_HALF_WIDTH);
        context.close_path();
        context.set_fill_style_str("#fbbf24");
        context.fill();
        context.set_stroke_style_str("#b45309");
        context.set_line_width(2.0);
        context.stroke();
    }

    fn fill_particle(&mut self, x: f64, y: f64, size: f64, alpha: f64, color: &str) {
        let context = &self.context;
        context.save();
        context.set_global_alpha(alpha);
        context.begin_path();
        context.set_fill_style_str(color);
        let _ = context.arc(x, y, size, 0.0, 2.0 * PI);
        context.fill();
        context.restore();
    }

    fn fill_overlay(&mut self, geometry: &WheelGeometry, alpha: f64) {
        let context = &self.context;
        context.begin_path();
        context.set_fill_style_str(&format!("rgba(255, 255, 255, {})", alpha));
        let _ = context.arc(geometry.center_x, geometry.center_y, geometry.radius, 0.0, TAU);
        context.fill();
    }

    fn draw_placeholder(&mut self, geometry: &WheelGeometry, message: &str) {
        let context = &self.context;
        context.begin_path();
        context.set_fill_style_str(if is_dark_mode() { "#1a1c2e" } else { "#f0f2ff" });
        let _ = context.arc(geometry.center_x, geometry.center_y, geometry.radius, 0.0, TAU);
        context.fill();

        context.set_font("16px system-ui, sans-serif");
        context.set_text_align("center");
        context.set_text_baseline("middle");
        context.set_fill_style_str(if is_dark_mode() { "#d1d5db" } else { "#4b5563" });
        let _ = context.fill_text_with_max_width(
            message,
            geometry.center_x,
            geometry.center_y,
            geometry.radius * 1.6,
        );
    }
}

#[derive(Properties, PartialEq)]
pub struct WheelCanvasProps {
    pub canvas_ref: NodeRef,
    #[prop_or(400)]
    pub size: u32,
}

#[function_component(WheelCanvas)]
pub fn wheel_canvas(props: &WheelCanvasProps) -> Html {
    html! {
        <canvas
            ref={props.canvas_ref.clone()}
            width={props.size.to_string()}
            height={props.size.to_string()}
            class="max-w-full h-auto"
        />
    }
}
