//! Model response parsing.
//!
//! Turns the semi-structured text returned by the model into a [`Recipe`].
//! Every field is extracted independently and the parser never fails: whatever
//! cannot be found falls back to its default (placeholder title, empty time,
//! `N/A` nutrition, empty lists).

use regex::Regex;
use std::sync::LazyLock;

use crate::types::{Nutrition, Recipe, DEFAULT_TITLE, NOT_AVAILABLE};

static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?mi)Title:[*_]*[ \t]*(.+?)[ \t]*(?:Cooking Time:|$)").expect("valid title regex")
});

static COOKING_TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?mi)Cooking Time:[*_]*[ \t]*(.+?)[ \t]*(?:(?-i:NUTRITION START)|$)")
        .expect("valid cooking time regex")
});

static NUTRITION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)NUTRITION START(.*?)NUTRITION END").expect("valid nutrition regex")
});

static CALORIES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Calories:\s*(\d+)").expect("valid calories regex"));
static PROTEIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Protein:\s*(\d+)").expect("valid protein regex"));
static CARBS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Carbs:\s*(\d+)").expect("valid carbs regex"));
static FATS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Fats:\s*(\d+)").expect("valid fats regex"));

// Section markers sit at the start of a line, optionally wrapped in markdown
// ("## Method:", "**Ingredients:**"). The closing emphasis belongs to the marker.
static INGREDIENTS_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t#*_]*Ingredients:[*_]*").expect("valid ingredients marker")
});
static METHOD_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t#*_]*(?:Method|Steps):[*_]*").expect("valid method marker")
});
static TIPS_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t#*_]*(?:Chef Tips|Tips):[*_]*").expect("valid tips marker")
});

static BULLET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-•*]\s*").expect("valid bullet regex"));
static STEP_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:[-•*]\s*)?(?:step\s*)?\d+\s*[.):]\s*").expect("valid step regex")
});

/// A marker match: where its line starts and where its content begins.
#[derive(Debug, Clone, Copy)]
struct Marker {
    line_start: usize,
    content_start: usize,
}

fn find_marker(re: &Regex, text: &str, from: usize) -> Option<Marker> {
    let m = re.find_at(text, from)?;
    let line_start = text[..m.start()].rfind('\n').map_or(0, |i| i + 1);
    Some(Marker {
        line_start,
        content_start: m.end(),
    })
}

/// Drop emphasis wrapping a whole value: "**Gobi Manchurian**" -> "Gobi Manchurian".
fn strip_emphasis(value: &str) -> &str {
    let value = value.trim();
    let wrap_len = value.len() - value.trim_start_matches(['*', '_']).len();
    if wrap_len == 0 || value.len() <= 2 * wrap_len {
        return value;
    }
    let (wrap, rest) = value.split_at(wrap_len);
    rest.strip_suffix(wrap).map_or(value, str::trim)
}

fn extract_single(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| strip_emphasis(m.as_str()).to_string())
        .filter(|v| !v.is_empty())
}

fn extract_nutrition(text: &str) -> Nutrition {
    let Some(block) = NUTRITION_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
    else {
        return Nutrition::default();
    };

    let capture = |re: &Regex, unit: &str| {
        re.captures(block)
            .and_then(|caps| caps.get(1))
            .map(|m| format!("{}{}", m.as_str(), unit))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    };

    Nutrition {
        calories: capture(&CALORIES_RE, " kcal"),
        protein: capture(&PROTEIN_RE, "g"),
        carbs: capture(&CARBS_RE, "g"),
        fats: capture(&FATS_RE, "g"),
    }
}

/// Split a section into items: one per non-blank line, list prefix removed.
fn section_lines(section: &str, prefix: &Regex) -> Vec<String> {
    section
        .lines()
        .map(|line| prefix.replace(line.trim(), "").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}

/// Parse a model response into a recipe. Never fails.
pub fn parse_recipe_response(text: &str) -> Recipe {
    let title = extract_single(&TITLE_RE, text).unwrap_or_else(|| DEFAULT_TITLE.to_string());
    let cooking_time = extract_single(&COOKING_TIME_RE, text).unwrap_or_default();
    let nutrition = extract_nutrition(text);

    let ingredients_marker = find_marker(&INGREDIENTS_MARKER, text, 0);
    let method_from = ingredients_marker.map_or(0, |m| m.content_start);
    let method_marker = find_marker(&METHOD_MARKER, text, method_from);
    let tips_from = method_marker
        .or(ingredients_marker)
        .map_or(0, |m| m.content_start);
    let tips_marker = find_marker(&TIPS_MARKER, text, tips_from);

    let ingredients = ingredients_marker
        .map(|start| {
            let end = method_marker
                .or(tips_marker)
                .map_or(text.len(), |m| m.line_start.max(start.content_start));
            section_lines(&text[start.content_start..end], &BULLET_RE)
        })
        .unwrap_or_default();

    let method = method_marker
        .map(|start| {
            let end = tips_marker.map_or(text.len(), |m| m.line_start.max(start.content_start));
            section_lines(&text[start.content_start..end], &STEP_NUMBER_RE)
        })
        .unwrap_or_default();

    let chef_tips = tips_marker
        .map(|start| section_lines(&text[start.content_start..], &BULLET_RE))
        .unwrap_or_default();

    let recipe = Recipe {
        title,
        cooking_time,
        nutrition,
        ingredients,
        method,
        chef_tips,
    };

    if recipe.is_incomplete() {
        tracing::warn!(
            title = %recipe.title,
            ingredients = recipe.ingredients.len(),
            steps = recipe.method.len(),
            "Model response was missing recipe sections"
        );
    }

    recipe
}
