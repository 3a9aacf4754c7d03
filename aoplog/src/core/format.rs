//! Pure rendering of advice log lines.
//!
//! Rendering is best-effort: a `Display` impl that fails or panics turns
//! into [`UNRENDERABLE`] instead of escaping into the wrapped call.

use std::fmt::{self, Write as _};
use std::panic::{self, AssertUnwindSafe};

use crate::core::types::{MethodMeta, ReturnKind};

/// Display text for an absent value.
pub const NULL_DISPLAY: &str = "null";
/// Placeholder for a fragment whose `Display` impl failed.
pub const UNRENDERABLE: &str = "<unrenderable>";

/// Text rendering of a method result.
///
/// Returns `None` for an absent value, which renders as [`NULL_DISPLAY`].
/// Implement it for your own `Display` types with [`render_via_display!`].
///
/// [`render_via_display!`]: crate::render_via_display
pub trait RenderValue {
    fn render_value(&self) -> Option<String>;
}

/// Implement [`RenderValue`] for types whose `Display` output is their log text.
#[macro_export]
macro_rules! render_via_display {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::core::format::RenderValue for $ty {
                fn render_value(&self) -> Option<String> {
                    Some($crate::core::format::display_best_effort(self))
                }
            }
        )+
    };
}

render_via_display!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
    String, str
);

impl<T: RenderValue + ?Sized> RenderValue for &T {
    fn render_value(&self) -> Option<String> {
        (**self).render_value()
    }
}

impl<T: RenderValue + ?Sized> RenderValue for Box<T> {
    fn render_value(&self) -> Option<String> {
        (**self).render_value()
    }
}

impl<T: RenderValue> RenderValue for Option<T> {
    fn render_value(&self) -> Option<String> {
        self.as_ref().and_then(RenderValue::render_value)
    }
}

impl<T: RenderValue> RenderValue for Vec<T> {
    fn render_value(&self) -> Option<String> {
        let items: Vec<String> = self
            .iter()
            .map(|item| {
                item.render_value()
                    .unwrap_or_else(|| NULL_DISPLAY.to_string())
            })
            .collect();
        Some(format!("[{}]", items.join(", ")))
    }
}

/// Render a value through `Display`, isolating failures and panics.
pub fn display_best_effort<T: fmt::Display + ?Sized>(value: &T) -> String {
    let rendered = panic::catch_unwind(AssertUnwindSafe(|| {
        let mut buf = String::new();
        write!(buf, "{value}").map(|()| buf)
    }));
    match rendered {
        Ok(Ok(text)) => text,
        _ => UNRENDERABLE.to_string(),
    }
}

/// Call [`RenderValue::render_value`], turning a panic into [`UNRENDERABLE`].
pub fn render_best_effort<T: RenderValue + ?Sized>(value: &T) -> Option<String> {
    panic::catch_unwind(AssertUnwindSafe(|| value.render_value()))
        .unwrap_or_else(|_| Some(UNRENDERABLE.to_string()))
}

/// `[a, b, c]`
pub fn render_args(args: &[&dyn fmt::Display]) -> String {
    let items: Vec<String> = args.iter().map(|arg| display_best_effort(*arg)).collect();
    format!("[{}]", items.join(", "))
}

/// `{ret} {type_path}::{method}({params})`, with `()` for void methods.
pub fn signature(meta: &MethodMeta) -> String {
    let ret = match &meta.returns {
        ReturnKind::Void => "()",
        ReturnKind::Value(ty) => ty.as_str(),
    };
    format!(
        "{ret} {}::{}({})",
        meta.type_path,
        meta.method,
        meta.params.join(", ")
    )
}

pub fn entry_line(meta: &MethodMeta, args: &[&dyn fmt::Display]) -> String {
    format!(
        "[>>] {}.{}({})",
        meta.simple_type_name(),
        meta.method,
        render_args(args)
    )
}

/// Exit line for a value-returning method; `None` renders as [`NULL_DISPLAY`].
pub fn exit_value_line(meta: &MethodMeta, result: Option<&str>) -> String {
    format!(
        "[o<] [{}] <== {}::{}()",
        result.unwrap_or(NULL_DISPLAY),
        meta.simple_type_name(),
        meta.method
    )
}

pub fn exit_void_line(meta: &MethodMeta) -> String {
    format!("[<<] {}::{}()", meta.simple_type_name(), meta.method)
}

pub fn error_line<E: fmt::Display + ?Sized>(
    meta: &MethodMeta,
    args: &[&dyn fmt::Display],
    error: &E,
) -> String {
    format!(
        "Exception in method: [{}.{}] with arguments ({})\n Signature [ {} ]\n Exception [ {} ]",
        meta.simple_type_name(),
        meta.method,
        render_args(args),
        signature(meta),
        display_best_effort(error)
    )
}

pub fn replace_start_line(meta: &MethodMeta) -> String {
    format!("We start working instead of {}", meta.method)
}

pub fn replace_finish_line(meta: &MethodMeta) -> String {
    format!("We have finished working instead of {}", meta.method)
}
