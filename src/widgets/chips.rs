// ============================================================================
// CHIPS WIDGET - Editor de tags dentro de un input de texto
// ============================================================================
// Cada instancia montada es dueña exclusiva de su lista de tags; no hay
// estado compartido entre instancias. El campo oculto guarda siempre la
// lista ordenada serializada como JSON.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement};

use crate::dom::{
    add_class, get_attribute, get_element_by_id, insert_before, on_blur, on_click, on_keydown,
    query_selector_all, ElementBuilder,
};

pub const MAX_TAGS: usize = 20;
pub const MAX_TAG_LENGTH: usize = 24;

/// Resultado del parseo de la semilla inicial (data-initial o el valor
/// previo del campo oculto). Cada rama se maneja explícitamente.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedValue {
    /// JSON array de strings
    ParsedAsList(Vec<String>),
    /// String plano delimitado por comas
    ParsedAsDelimited(Vec<String>),
    /// Vacío o JSON válido que no es una lista
    Empty,
}

impl SeedValue {
    fn into_values(self) -> Vec<String> {
        match self {
            SeedValue::ParsedAsList(values) | SeedValue::ParsedAsDelimited(values) => values,
            SeedValue::Empty => Vec::new(),
        }
    }
}

pub fn parse_seed(raw: &str) -> SeedValue {
    if raw.trim().is_empty() {
        return SeedValue::Empty;
    }
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Array(items)) => SeedValue::ParsedAsList(
            items
                .into_iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
        ),
        Ok(_) => SeedValue::Empty,
        Err(_) => SeedValue::ParsedAsDelimited(raw.split(',').map(str::to_string).collect()),
    }
}

/// Recortar espacios y truncar a la longitud máxima de un tag.
fn normalize_tag(raw: &str) -> String {
    raw.trim().chars().take(MAX_TAG_LENGTH).collect()
}

/// Lista de tags con los invariantes del widget: máximo 20, sin
/// duplicados (case-insensitive), orden de inserción.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChipList {
    tags: Vec<String>,
}

impl ChipList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(seed: SeedValue) -> Self {
        let mut list = Self::new();
        for raw in seed.into_values() {
            list.add(&raw);
        }
        list
    }

    /// Agregar un tag. Duplicados (ignorando mayúsculas), vacíos y el
    /// tag 21 son no-ops que devuelven false.
    pub fn add(&mut self, raw: &str) -> bool {
        let tag = normalize_tag(raw);
        if tag.is_empty() || self.tags.len() >= MAX_TAGS {
            return false;
        }
        let lowered = tag.to_lowercase();
        if self.tags.iter().any(|existing| existing.to_lowercase() == lowered) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    pub fn remove(&mut self, index: usize) -> Option<String> {
        if index < self.tags.len() {
            Some(self.tags.remove(index))
        } else {
            None
        }
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Valor persistido en el campo oculto: la lista ordenada como JSON.
    pub fn serialized(&self) -> String {
        serde_json::to_string(&self.tags).unwrap_or_else(|_| "[]".to_string())
    }
}

/// Montar todos los editores de chips de la página.
pub fn mount_chip_boxes() -> Result<(), JsValue> {
    for box_el in query_selector_all(".chips-box")? {
        mount_chip_box(&box_el)?;
    }
    Ok(())
}

fn mount_chip_box(box_el: &Element) -> Result<(), JsValue> {
    let Some(target_id) = get_attribute(box_el, "data-target") else {
        return Ok(());
    };
    let Some(hidden) = get_element_by_id(&target_id)
        .and_then(|element| element.dyn_into::<HtmlInputElement>().ok())
    else {
        return Ok(());
    };
    let Some(input_el) = box_el.query_selector("input")? else {
        return Ok(());
    };

    let _ = add_class(hidden.as_ref(), "d-none");

    let seed_raw = get_attribute(box_el, "data-initial").unwrap_or_else(|| hidden.value());
    let list = Rc::new(RefCell::new(ChipList::from_seed(parse_seed(&seed_raw))));

    render_chips(box_el, &input_el, &hidden, &list)?;

    // Enter o coma confirman el tag en curso
    {
        let box_el = box_el.clone();
        let input_el = input_el.clone();
        let hidden = hidden.clone();
        let list = list.clone();
        let input = input_el
            .dyn_ref::<HtmlInputElement>()
            .cloned()
            .ok_or_else(|| JsValue::from_str("chips-box sin input de texto"))?;

        on_keydown(&input_el.clone(), move |event| {
            if event.key() != "Enter" && event.key() != "," {
                return;
            }
            event.prevent_default();
            {
                list.borrow_mut().add(&input.value());
            }
            input.set_value("");
            let _ = render_chips(&box_el, &input_el, &hidden, &list);
        })?;
    }

    // Blur confirma lo que quede escrito
    {
        let box_el = box_el.clone();
        let input_el = input_el.clone();
        let hidden = hidden.clone();
        let list = list.clone();
        let input = input_el
            .dyn_ref::<HtmlInputElement>()
            .cloned()
            .ok_or_else(|| JsValue::from_str("chips-box sin input de texto"))?;

        on_blur(&input_el.clone(), move |_| {
            if input.value().trim().is_empty() {
                return;
            }
            {
                list.borrow_mut().add(&input.value());
            }
            input.set_value("");
            let _ = render_chips(&box_el, &input_el, &hidden, &list);
        })?;
    }

    Ok(())
}

/// Re-render completo de los chips del box y sync del campo oculto.
fn render_chips(
    box_el: &Element,
    input_el: &Element,
    hidden: &HtmlInputElement,
    list: &Rc<RefCell<ChipList>>,
) -> Result<(), JsValue> {
    let existing = box_el.query_selector_all(".chip")?;
    for i in 0..existing.length() {
        if let Some(node) = existing.item(i) {
            if let Ok(chip) = node.dyn_into::<Element>() {
                chip.remove();
            }
        }
    }

    let tags = list.borrow().tags().to_vec();
    for (index, tag) in tags.iter().enumerate() {
        let chip = ElementBuilder::new("span")?.class("chip").text(tag).build();

        let close = ElementBuilder::new("button")?
            .attr("type", "button")?
            .class("chip-remove")
            .text("×")
            .attr("aria-label", &format!("Quitar {}", tag))?
            .build();

        {
            let box_el = box_el.clone();
            let input_el = input_el.clone();
            let hidden = hidden.clone();
            let list = list.clone();

            on_click(&close, move |_| {
                {
                    list.borrow_mut().remove(index);
                }
                let _ = render_chips(&box_el, &input_el, &hidden, &list);
            })?;
        }

        chip.append_child(&close)?;
        insert_before(box_el, &chip, input_el)?;
    }

    hidden.set_value(&list.borrow().serialized());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn semilla_json_se_parsea_como_lista() {
        assert_eq!(
            parse_seed(r#"["café", "arte"]"#),
            SeedValue::ParsedAsList(vec!["café".to_string(), "arte".to_string()])
        );
    }

    #[test]
    fn semilla_delimitada_se_parte_por_comas() {
        assert_eq!(
            parse_seed("café, arte"),
            SeedValue::ParsedAsDelimited(vec!["café".to_string(), " arte".to_string()])
        );
    }

    #[test]
    fn semilla_vacia_o_json_no_lista_queda_empty() {
        assert_eq!(parse_seed(""), SeedValue::Empty);
        assert_eq!(parse_seed("   "), SeedValue::Empty);
        assert_eq!(parse_seed(r#"{"a": 1}"#), SeedValue::Empty);
        assert_eq!(parse_seed("42"), SeedValue::Empty);
    }

    #[test]
    fn duplicado_case_insensitive_es_no_op() {
        let mut list = ChipList::new();
        assert!(list.add("Café"));
        assert!(!list.add("café"));
        assert!(!list.add("  CAFÉ  "));
        assert_eq!(list.tags(), ["Café"]);
    }

    #[test]
    fn el_tag_21_es_no_op() {
        let mut list = ChipList::new();
        for i in 0..MAX_TAGS {
            assert!(list.add(&format!("tag{}", i)));
        }
        assert!(!list.add("uno-mas"));
        assert_eq!(list.tags().len(), MAX_TAGS);
    }

    #[test]
    fn los_tags_se_truncan_a_la_longitud_maxima() {
        let mut list = ChipList::new();
        list.add("abcdefghijklmnopqrstuvwxyz");
        assert_eq!(list.tags()[0], "abcdefghijklmnopqrstuvwx");
        assert_eq!(list.tags()[0].chars().count(), MAX_TAG_LENGTH);
    }

    #[test]
    fn quitar_un_tag_conserva_el_orden_restante() {
        let mut list = ChipList::from_seed(parse_seed(r#"["uno", "dos", "tres"]"#));
        assert_eq!(list.remove(1), Some("dos".to_string()));
        assert_eq!(list.serialized(), r#"["uno","tres"]"#);
        assert_eq!(list.remove(7), None);
    }

    #[test]
    fn la_semilla_delimitada_normaliza_cada_tag() {
        let list = ChipList::from_seed(parse_seed("café,  arte , , café"));
        assert_eq!(list.tags(), ["café", "arte"]);
    }
}
