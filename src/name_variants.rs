//! Full forms of abbreviated adjectives in place names.
//!
//! "Б. Засеково", "Н. Валуево", "Ст. Оскол": the leading adjective is often
//! cut to one or a few letters. [`expand`] maps such a stem plus grammatical
//! gender and number to the inflected full forms, most likely first.
//!
//! ```
//! use layered_geo::name_variants::expand;
//! use layered_geo::{Gender, Number};
//!
//! let forms = expand("Н", Gender::MASCULINE, Number::SINGULAR, true).unwrap();
//! assert_eq!(forms, vec!["НОВЫЙ", "НИЖНИЙ"]);
//! ```

use crate::morph::{Gender, Number};
use crate::token_line::GeoToken;

/// One adjective's four forms.
struct StdAdjective {
    plural: &'static str,
    feminine: &'static str,
    masculine: &'static str,
    neuter: &'static str,
}

impl StdAdjective {
    fn singular(&self, gender: Gender) -> &'static str {
        if gender == Gender::FEMININE {
            self.feminine
        } else if gender == Gender::MASCULINE {
            self.masculine
        } else {
            self.neuter
        }
    }

    fn forms(&self, gender: Gender, number: Number, strict: bool) -> Vec<String> {
        if number == Number::PLURAL {
            return vec![self.plural.to_string()];
        }
        let mut res = Vec::new();
        if !strict && number.contains(Number::PLURAL) {
            res.push(self.plural.to_string());
        }
        for g in Gender::ALL {
            if gender.contains(g) && (!strict || gender == g) {
                res.push(self.singular(g).to_string());
            }
        }
        res
    }
}

static BOLSHOI: StdAdjective = StdAdjective {
    plural: "БОЛЬШИЕ",
    feminine: "БОЛЬШАЯ",
    masculine: "БОЛЬШОЙ",
    neuter: "БОЛЬШОЕ",
};
static MALYI: StdAdjective = StdAdjective {
    plural: "МАЛЫЕ",
    feminine: "МАЛАЯ",
    masculine: "МАЛЫЙ",
    neuter: "МАЛОЕ",
};
static VERKHNII: StdAdjective = StdAdjective {
    plural: "ВЕРХНИЕ",
    feminine: "ВЕРХНЯЯ",
    masculine: "ВЕРХНИЙ",
    neuter: "ВЕРХНЕЕ",
};
static NOVYI: StdAdjective = StdAdjective {
    plural: "НОВЫЕ",
    feminine: "НОВАЯ",
    masculine: "НОВЫЙ",
    neuter: "НОВОЕ",
};
static NIZHNII: StdAdjective = StdAdjective {
    plural: "НИЖНИЕ",
    feminine: "НИЖНЯЯ",
    masculine: "НИЖНИЙ",
    neuter: "НИЖНЕЕ",
};
static KRASNYI: StdAdjective = StdAdjective {
    plural: "КРАСНЫЕ",
    feminine: "КРАСНАЯ",
    masculine: "КРАСНЫЙ",
    neuter: "КРАСНОЕ",
};
static STARYI: StdAdjective = StdAdjective {
    plural: "СТАРЫЕ",
    feminine: "СТАРАЯ",
    masculine: "СТАРЫЙ",
    neuter: "СТАРОЕ",
};
static SREDNII: StdAdjective = StdAdjective {
    plural: "СРЕДНИЕ",
    feminine: "СРЕДНЯЯ",
    masculine: "СРЕДНИЙ",
    neuter: "СРЕДНЕЕ",
};

fn non_empty(res: Vec<String>) -> Option<Vec<String>> {
    if res.is_empty() {
        None
    } else {
        Some(res)
    }
}

/// Both readings of an ambiguous one-letter stem: the first reading's lead
/// form, then the second's lead form, then the rest of each.
fn merge(first: Option<Vec<String>>, second: Option<Vec<String>>) -> Option<Vec<String>> {
    match (first, second) {
        (None, None) => None,
        (Some(r), None) | (None, Some(r)) => Some(r),
        (Some(mut r1), Some(mut r2)) => {
            let lead = r2.remove(0);
            r1.insert(1, lead);
            r1.extend(r2);
            Some(r1)
        }
    }
}

/// Inflected full forms for `stem`, or `None` for a stem that is not one
/// of the known abbreviations.
///
/// With `strict` a gender form is produced only when `gender` is exactly
/// that gender; otherwise every gender bit set yields its form, and a
/// plural bit adds the plural form first.
pub fn expand(stem: &str, gender: Gender, number: Number, strict: bool) -> Option<Vec<String>> {
    let stem = stem.to_uppercase();
    if stem.starts_with('Б') {
        return non_empty(BOLSHOI.forms(gender, number, strict));
    }
    if stem.starts_with('М') {
        return non_empty(MALYI.forms(gender, number, strict));
    }
    if stem.starts_with('В') {
        let mut res = VERKHNII.forms(gender, number, strict);
        if res.is_empty() && gender.is_undefined() {
            res.push(VERKHNII.masculine.to_string());
        }
        return non_empty(res);
    }
    if stem == "Н" {
        return merge(
            expand("НОВ", gender, number, strict),
            expand("НИЖ", gender, number, strict),
        );
    }
    // Latin "C" shows up in OCR'd and mixed-layout text
    if stem == "С" || stem == "C" {
        return merge(
            expand("СТ", gender, number, strict),
            expand("СР", gender, number, strict),
        );
    }

    let adjective = if stem.starts_with("НОВ") {
        &NOVYI
    } else if stem.starts_with("НИЖ") {
        &NIZHNII
    } else if stem.starts_with("КР") {
        &KRASNYI
    } else if stem.starts_with("СТ") {
        &STARYI
    } else if stem.starts_with("СР") {
        &SREDNII
    } else {
        return None;
    };
    non_empty(adjective.forms(gender, number, strict))
}

/// [`expand`] over a token's term; only lettered tokens qualify.
pub fn expand_token(
    token: &GeoToken,
    gender: Gender,
    number: Number,
    strict: bool,
) -> Option<Vec<String>> {
    if !token.is_letters() {
        return None;
    }
    expand(token.term(), gender, number, strict)
}
