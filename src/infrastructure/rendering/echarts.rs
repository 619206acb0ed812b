use crate::domain::{
    errors::RenderError,
    logging::{LogComponent, get_logger},
};
use gloo::events::EventListener;
use gloo::utils::format::JsValueSerdeExt;
use js_sys::{Array, Function, Reflect};
use serde_json::Value;
use wasm_bindgen::{JsCast, JsValue};

/// Mounts ECharts options into DOM containers through `window.echarts`.
pub struct EChartsRenderer;

impl EChartsRenderer {
    pub fn is_available() -> bool {
        web_sys::window()
            .and_then(|window| Reflect::get(&window, &JsValue::from_str("echarts")).ok())
            .map(|echarts| !echarts.is_undefined() && !echarts.is_null())
            .unwrap_or(false)
    }

    /// Initializes a chart in `container_id` and applies `option`.
    ///
    /// Any instance already attached to the element is disposed first.
    pub fn mount(container_id: &str, option: &Value) -> Result<MountedChart, RenderError> {
        let window = web_sys::window().ok_or(RenderError::BrowserUnavailable)?;
        let document = window.document().ok_or(RenderError::BrowserUnavailable)?;

        let echarts = Reflect::get(&window, &JsValue::from_str("echarts"))
            .ok()
            .filter(|value| !value.is_undefined() && !value.is_null())
            .ok_or(RenderError::ChartLibraryMissing)?;

        let container = document
            .get_element_by_id(container_id)
            .ok_or_else(|| RenderError::ContainerMissing(container_id.to_string()))?;
        let container: JsValue = container.into();

        let previous = call_method(&echarts, "getInstanceByDom", &[&container])?;
        if !previous.is_undefined() && !previous.is_null() {
            call_method(&previous, "dispose", &[])?;
        }

        let instance = call_method(&echarts, "init", &[&container])?;
        let option = JsValue::from_serde(option).map_err(|e| RenderError::ScriptError(e.to_string()))?;
        call_method(&instance, "setOption", &[&option])?;

        let resized = instance.clone();
        let resize = EventListener::new(&window, "resize", move |_| {
            if let Err(error) = call_method(&resized, "resize", &[]) {
                get_logger().warn(LogComponent::Infrastructure("ECharts"), &error.to_string());
            }
        });

        get_logger().debug(
            LogComponent::Infrastructure("ECharts"),
            &format!("📈 chart mounted in #{}", container_id),
        );

        Ok(MountedChart { instance, _resize: resize })
    }
}

/// A live chart; dropping it disposes the instance and its resize listener.
pub struct MountedChart {
    instance: JsValue,
    _resize: EventListener,
}

impl Drop for MountedChart {
    fn drop(&mut self) {
        let _ = call_method(&self.instance, "dispose", &[]);
    }
}

fn call_method(target: &JsValue, name: &str, args: &[&JsValue]) -> Result<JsValue, RenderError> {
    let method = Reflect::get(target, &JsValue::from_str(name))
        .map_err(script_error)?
        .dyn_into::<Function>()
        .map_err(|_| RenderError::ScriptError(format!("{} is not a function", name)))?;

    let arguments = Array::new();
    for arg in args {
        arguments.push(arg);
    }
    method.apply(target, &arguments).map_err(script_error)
}

fn script_error(value: JsValue) -> RenderError {
    RenderError::ScriptError(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}
