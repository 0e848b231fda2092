//! Actions, setups, options and angel items.
use ltdoc_xml::Element;

use super::{ElementKind, Walker, short_text};
use crate::{
  builder::HtmlBuilder,
  document::IndexEntry,
  error::StructuralError,
  nesting::Nesting,
};

/// Parameter name used for options that do not declare any.
const IMPLICIT_OPTION_PARAMETER: &str = "value";

/// Render the `<pre class="template">` usage line for an item.
pub(super) fn signature(out: &mut HtmlBuilder, name: &str, parameters: &[&str]) {
  out
    .open("pre", &[("class", "template")])
    .element("span", &[("class", "key")], name);

  match parameters {
    [] => {},
    [single] => {
      out.text(" ").element("span", &[("class", "param")], single);
    },
    many => {
      out.text("(");
      for (i, parameter) in many.iter().enumerate() {
        if i > 0 {
          out.text(", ");
        }
        out.element("span", &[("class", "param")], parameter);
      }
      out.text(")");
    },
  }

  out.text(";").close("pre");
}

fn required_name<'a>(
  element: &'a Element,
  what: &str,
) -> Result<&'a str, StructuralError> {
  element
    .attr("name")
    .ok_or_else(|| StructuralError::missing_attribute(what, "name"))
}

impl Walker<'_> {
  pub(super) fn item(
    &mut self,
    cx: &mut Nesting,
    out: &mut HtmlBuilder,
    kind: ElementKind,
    element: &Element,
  ) -> Result<(), StructuralError> {
    let kind_name = kind.name();
    let name = required_name(element, kind_name)?;

    let mut parameters = element
      .children_named("parameter")
      .map(|parameter| required_name(parameter, "parameter"))
      .collect::<Result<Vec<_>, _>>()?;
    if parameters.is_empty() && kind == ElementKind::Option {
      parameters.push(IMPLICIT_OPTION_PARAMETER);
    }

    let (title, anchor, class) = if kind == ElementKind::Item {
      (name.to_string(), name.to_string(), "aso item".to_string())
    } else {
      (
        format!("{name} ({kind_name})"),
        format!("{kind_name}_{name}"),
        format!("aso {kind_name}"),
      )
    };
    let short = short_text(element);

    let anchor =
      cx.anchored_section(out, &title, &anchor, Some(&class), |cx, out| {
        if let Some(short) = &short {
          out.element("p", &[("class", "short")], short);
        }
        signature(out, name, &parameters);

        if kind == ElementKind::Option {
          default_value(out, name, element)?;
        } else if !parameters.is_empty() {
          parameter_list(out, element)?;
        }

        self.description(out, element)?;
        for example in element.children_named("example") {
          self.example(cx, out, example)?;
        }
        Ok(())
      })?;

    let entry = IndexEntry {
      name: name.to_string(),
      href: format!("{}#{anchor}", self.owner.filename()),
      short,
      owner: self.owner.clone(),
    };
    match kind {
      ElementKind::Action => self.entries.actions.push(entry),
      ElementKind::Setup => self.entries.setups.push(entry),
      ElementKind::Option => self.entries.options.push(entry),
      _ => {},
    }
    Ok(())
  }
}

/// `Default value: <span class="KIND">value</span>`, where KIND is the name
/// of the first element inside `<default>`.
fn default_value(
  out: &mut HtmlBuilder,
  name: &str,
  option: &Element,
) -> Result<(), StructuralError> {
  let default = option.first_child_named("default").ok_or_else(|| {
    StructuralError::MissingElement {
      element: format!("option {name}"),
      child:   "default",
    }
  })?;

  let (class, value) = default.element_children().next().map_or_else(
    || (IMPLICIT_OPTION_PARAMETER, default.text_content()),
    |value| (value.name.as_str(), value.text_content()),
  );

  out
    .open("div", &[("class", "default")])
    .text("Default value: ")
    .element("span", &[("class", class)], value.trim())
    .close("div");
  Ok(())
}

fn parameter_list(
  out: &mut HtmlBuilder,
  item: &Element,
) -> Result<(), StructuralError> {
  out.open("dl", &[]);
  for parameter in item.children_named("parameter") {
    out.element("dt", &[], required_name(parameter, "parameter")?);

    let Some(detail) = parameter.element_children().next() else {
      continue;
    };
    match detail.name.as_str() {
      "short" => {
        out.element("dd", &[], short_text(parameter).as_deref().unwrap_or_default());
      },
      "table" => {
        out
          .open("dd", &[])
          .text("A key-value table with the following entries:")
          .open("dl", &[]);
        for entry in detail.element_children() {
          out
            .element("dt", &[], required_name(entry, "entry")?)
            .element("dd", &[], short_text(entry).as_deref().unwrap_or_default());
        }
        out.close("dl").close("dd");
      },
      _ => {},
    }
  }
  out.close("dl");
  Ok(())
}
