//! Voice Pattern Table
//!
//! The ordered rule cascade used to pull trip fields out of a transcript.
//! Rules are listed in priority order: combined money phrases first, then
//! service, place, name and address phrasing, odometers and distance, unit
//! and order numbers, and finally single-field money fallbacks.
//!
//! The `regex` crate has no lookaround, so context checks (a bare "$12" next
//! to the word "tip", "5 miles" in a sentence about the odometer) are done by
//! guard functions that see the captures and the whole transcript.

use super::result::Field;
use crate::core::text_normalizer::is_number_word;
use lazy_static::lazy_static;
use regex::{Captures, Regex};

/// Extra acceptance check run on a candidate match
pub type Guard = fn(&Captures<'_>, &str) -> bool;

/// Coarse priority band of a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    CombinedMoney,
    ServiceType,
    Service,
    Place,
    Party,
    Odometer,
    Identifier,
    MoneyFallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    PayTipBonus,
    PayTip,
    PayDistance,
    ServiceType,
    Service,
    PickupShop,
    Place,
    PlaceType,
    Type,
    Name,
    PickupAddress,
    DropoffAddress,
    StartOdometer,
    EndOdometer,
    Distance,
    BareDistance,
    UnitNumber,
    OrderNumber,
    Pay,
    Tip,
    Bonus,
    Cash,
}

/// One regex of a rule. Named groups are the `Field::key` of what they capture.
pub struct Pattern {
    pub regex: Regex,
    pub guard: Option<Guard>,
}

pub struct Rule {
    pub kind: RuleKind,
    pub stage: Stage,
    /// Fields this rule may set
    pub fields: &'static [Field],
    /// The rule is skipped once any of these is set
    pub suppressed_by: &'static [Field],
    pub patterns: Vec<Pattern>,
}

impl Rule {
    /// First match of the first pattern that produces one passing its guard.
    pub fn find<'t>(&self, text: &'t str) -> Option<Captures<'t>> {
        for pattern in &self.patterns {
            for caps in pattern.regex.captures_iter(text) {
                if pattern.guard.map_or(true, |guard| guard(&caps, text)) {
                    return Some(caps);
                }
            }
        }
        None
    }
}

lazy_static! {
    /// The rule cascade, in application order
    pub static ref RULES: Vec<Rule> = build_rules();

    static ref ODOMETER_MENTION: Regex = compile(r"(?i)\bodo(?:meter)?s?\b");

    static ref MONEY_QUALIFIER: Regex = compile(
        r"(?i)\b(?:tips?|tipped|gratuity|bonus|promo|promotion|incentive|peak\s+pay|quest|surge|cash)\b"
    );
}

// Building blocks substituted into the pattern sources below
const FRAGMENTS: [(&str, &str); 11] = [
    ("{MONEY}", r"(?:\d+(?:,\d{3})*(?:\.\d+)?|[a-z]+(?:-[a-z]+)?(?:\s+[a-z]+)?)"),
    ("{AMT}", r"\d+(?:,\d{3})*(?:\.\d+)?"),
    ("{DOLLARS}", r"(?:dollars?|bucks?)"),
    ("{BONUS}", r"(?:bonus|promo|promotion|incentive|peak\s+pay|quest|surge)"),
    ("{TYPE}", r"(?:delivery|pickup|ride|shopping|shop|dropoff|drop\s+off)"),
    ("{UNIT}", r"(?:miles?|mi|km|kilometers?|kilometres?)\b"),
    ("{PLACE_END}", r"(?:\s+(?:and|to|for|drop|dropping|deliver|delivering|going)\b|\s*,|\s*$)"),
    ("{PLACE}", r"[\w'&.-]+(?:\s+[\w'&.-]+)*?"),
    ("{NAME_END}", r"(?:\s+(?:and|with)\b|\s*[,;]|\s*\.?$)"),
    ("{NAME}", r"[a-z][a-z'.-]*(?:\s+[a-z][a-z'.-]*)*?"),
    ("{ADDR}", r"\d[\w\s,.#-]*?"),
];

fn compile(source: &str) -> Regex {
    let mut expanded = source.to_string();
    for (token, fragment) in FRAGMENTS {
        expanded = expanded.replace(token, fragment);
    }
    Regex::new(&expanded).unwrap_or_else(|e| panic!("invalid voice pattern {}: {}", source, e))
}

fn pattern(source: &str) -> Pattern {
    Pattern {
        regex: compile(source),
        guard: None,
    }
}

fn guarded(source: &str, guard: Guard) -> Pattern {
    Pattern {
        regex: compile(source),
        guard: Some(guard),
    }
}

fn rule(kind: RuleKind, stage: Stage, fields: &'static [Field], patterns: Vec<Pattern>) -> Rule {
    Rule {
        kind,
        stage,
        fields,
        suppressed_by: &[],
        patterns,
    }
}

impl Rule {
    fn suppressed_by(mut self, fields: &'static [Field]) -> Self {
        self.suppressed_by = fields;
        self
    }
}

// A trip read off the odometer gets its distance from the readings
const ODOMETERS: &[Field] = &[Field::StartOdometer, Field::EndOdometer];

fn build_rules() -> Vec<Rule> {
    use Field::*;

    vec![
        rule(
            RuleKind::PayTipBonus,
            Stage::CombinedMoney,
            &[Pay, Tip, Bonus],
            vec![
                // "pay is $15, tip $3, and bonus $2"
                pattern(
                    r"(?i)\bpay(?:ment)?\s*(?:is|was|of|:)?\s*\$?(?P<pay>{AMT})\s*{DOLLARS}?[\s,]+(?:and\s+)?(?:the\s+)?tip\s*(?:is|was|of|:)?\s*\$?(?P<tip>{AMT})\s*{DOLLARS}?[\s,]+(?:and\s+)?(?:the\s+)?{BONUS}\s*(?:is|was|of|:)?\s*\$?(?P<bonus>{AMT})",
                ),
                // "$20 pay, $5 tip, $3 bonus"
                pattern(
                    r"(?i)\$?(?P<pay>{AMT})\s*(?:{DOLLARS}\s*)?pay[\s,]+(?:and\s+)?\$?(?P<tip>{AMT})\s*(?:{DOLLARS}\s*)?tip[\s,]+(?:and\s+)?\$?(?P<bonus>{AMT})\s*(?:{DOLLARS}\s*)?{BONUS}",
                ),
                // "pay $18 and peak pay $2.50"
                pattern(
                    r"(?i)\bpay(?:ment)?\s*(?:is|was|of|:)?\s*\$?(?P<pay>{AMT})\s*{DOLLARS}?[\s,]+(?:and\s+)?(?:the\s+)?{BONUS}\s*(?:is|was|of|:)?\s*\$?(?P<bonus>{AMT})",
                ),
            ],
        ),
        rule(
            RuleKind::PayTip,
            Stage::CombinedMoney,
            &[Pay, Tip],
            vec![
                pattern(
                    r"(?i)\bpay(?:ment)?\s*(?:is|was|of|:)?\s*\$?(?P<pay>{AMT})\s*{DOLLARS}?[\s,]+(?:and\s+)?(?:the\s+)?tip\s*(?:is|was|of|:)?\s*\$?(?P<tip>{AMT})",
                ),
                pattern(
                    r"(?i)\$?(?P<pay>{AMT})\s*(?:{DOLLARS}\s*)?pay[\s,]+(?:and\s+)?\$?(?P<tip>{AMT})\s*(?:{DOLLARS}\s*)?tip\b",
                ),
            ],
        ),
        rule(
            RuleKind::PayDistance,
            Stage::CombinedMoney,
            &[Pay, Distance],
            vec![pattern(
                r"(?i)(?:\b(?:pay(?:ment)?\s*(?:is|was|:)?|paid|amount\s*(?:is|was|:)?)\s*)?\$?(?P<pay>{AMT})\s*{DOLLARS}?\s*for\s+(?P<distance>\d+(?:\.\d+)?)\s*{UNIT}",
            )],
        ),
        rule(
            RuleKind::ServiceType,
            Stage::ServiceType,
            &[Service, Type],
            vec![pattern(
                r"(?i)\b(?:i\s+have\s+an?|i\s+got\s+an?|got\s+an?|doing\s+an?|working|on|using)\s+(?P<service>[\w\s]+?)\s+(?P<type>{TYPE})\b",
            )],
        ),
        rule(
            RuleKind::Service,
            Stage::Service,
            &[Service],
            vec![
                guarded(
                    r"(?i)\b(?:i\s+have|i\s+got|got)\s+an?\s+(?P<service>[\w\s]+?)(?:\s+(?:order|delivery|trip|going|to|for|from|at)\b|$)",
                    service_not_keyword,
                ),
                guarded(
                    r"(?i)\b(?:working|driving|running|doing|on)\s+(?:for\s+)?(?P<service>[\w\s]+?)(?:\s+(?:order|delivery|trip|going|to|for|from|at|today|tonight)\b|$)",
                    service_not_keyword,
                ),
                guarded(
                    r"(?i)\b(?:service|app|platform)\s*(?:is|was|:)\s*(?P<service>[\w\s]+?)(?:\s+(?:order|delivery|trip|and)\b|$)",
                    service_not_keyword,
                ),
                guarded(
                    r"(?i)\b(?:using|with)\s+(?P<service>[\w\s]+?)(?:\s+(?:order|delivery|trip|going|to|for|from|at)\b|$)",
                    service_not_keyword,
                ),
                guarded(
                    r"(?i)\b(?:it'?s|this\s+is)\s+an?\s+(?P<service>[\w\s]+?)(?:\s+(?:order|delivery|trip|gig)\b|$)",
                    service_not_keyword,
                ),
            ],
        ),
        rule(
            RuleKind::PickupShop,
            Stage::Place,
            &[Type, Place],
            vec![guarded(
                r"(?i)(?:^|\b(?:have|got|doing)\s+an?\s+)(?P<type>pickup|shopping|shop)\s+from\s+(?P<place>{PLACE}){PLACE_END}",
                place_not_street_number,
            )],
        ),
        rule(
            RuleKind::Place,
            Stage::Place,
            &[Place],
            vec![
                guarded(
                    r"(?i)\b(?:pick(?:ing)?[- ]?up|grabbing|getting)\s+(?:from|at)\s+(?P<place>{PLACE}){PLACE_END}",
                    place_not_street_number,
                ),
                guarded(
                    r"(?i)\b(?:place|location|store|restaurant|merchant)\s*(?:is|was|:)\s*(?P<place>{PLACE}){PLACE_END}",
                    place_not_street_number,
                ),
                guarded(
                    r"(?i)\bfrom\s+(?P<place>{PLACE}){PLACE_END}",
                    place_not_street_number,
                ),
            ],
        ),
        rule(
            RuleKind::PlaceType,
            Stage::Place,
            &[Place, Type],
            // Place words start with a letter, so a leading "$3," is skipped
            vec![pattern(
                r"(?i)\b(?P<place>[^\W\d][\w'&.-]*(?:\s+[^\W\d][\w'&.-]*)*?)\s+(?P<type>{TYPE})(?:\s|$)",
            )],
        ),
        rule(
            RuleKind::Type,
            Stage::Place,
            &[Type],
            vec![
                pattern(
                    r"(?i)\btype\s*(?:is|was|:)\s*(?P<type>[a-z]+(?:\s+[a-z]+)*?)(?:\s+(?:for|to|at|from|and)\b|\s*[,.]|$)",
                ),
                pattern(r"(?i)\b(?:it'?s|this\s+is|got|have|doing)\s+an?\s+(?P<type>{TYPE})\b"),
                pattern(r"(?i)\b(?P<type>{TYPE})\s+(?:order|trip|run|gig)\b"),
            ],
        ),
        rule(
            RuleKind::Name,
            Stage::Party,
            &[Name],
            vec![
                pattern(
                    r"(?i)\b(?:(?:customer|client|person)(?:'s)?\s+name|name|person|customer|client)\s*(?:is|was|:)\s*(?P<name>{NAME}){NAME_END}",
                ),
                pattern(
                    r"(?i)\bdrop(?:ping)?[- ]?off\s+(?:to|with|for|at)\s+(?P<name>{NAME}){NAME_END}",
                ),
                pattern(
                    r"(?i)\b(?:deliver(?:ing|y)?\s+(?:to|for)|taking\s+(?:it\s+)?to|bringing\s+(?:it\s+)?to|going\s+to|headed\s+to)\s+(?P<name>{NAME}){NAME_END}",
                ),
            ],
        ),
        rule(
            RuleKind::PickupAddress,
            Stage::Party,
            &[PickupAddress],
            vec![pattern(
                r"(?i)\b(?:pick(?:ing)?[- ]?up\s+(?:at|on|from)|pick[- ]?up\s+(?:address|location)\s*(?:is|was|:)|(?:start(?:ing)?|from)\s+(?:address|location)\s*(?:is|was|:))\s*(?P<pickupAddress>{ADDR})(?:\s+(?:and|to|drop|dropping|deliver|delivering)\b|\s*$)",
            )],
        ),
        rule(
            RuleKind::DropoffAddress,
            Stage::Party,
            &[DropoffAddress],
            vec![pattern(
                r"(?i)\b(?:drop(?:ping)?[- ]?off\s+(?:at|on|to)|(?:drop[- ]?off|destination|end)\s+(?:address|location)\s*(?:is|was|:)|destination\s*(?:is|was|:)|going\s+to|heading\s+to|delivering\s+to)\s*(?P<dropoffAddress>{ADDR})(?:\s+and\b|\s*$)",
            )],
        ),
        rule(
            RuleKind::StartOdometer,
            Stage::Odometer,
            &[StartOdometer],
            vec![
                pattern(
                    r"(?i)\b(?:start(?:ing)?|begin(?:ning)?)\s+(?:odometer|odo)(?:\s+reading)?\s*(?:is|was|:|at)?\s*(?P<startOdometer>\d[\d,]*(?:\.\d+)?)",
                ),
                pattern(
                    r"(?i)\b(?:odometer|odo)\s+(?:start|begin)\s*(?:is|was|:|at)?\s*(?P<startOdometer>\d[\d,]*(?:\.\d+)?)",
                ),
            ],
        ),
        rule(
            RuleKind::EndOdometer,
            Stage::Odometer,
            &[EndOdometer],
            vec![
                pattern(
                    r"(?i)\b(?:end(?:ing)?|final)\s+(?:odometer|odo)(?:\s+reading)?\s*(?:is|was|:|at)?\s*(?P<endOdometer>\d[\d,]*(?:\.\d+)?)",
                ),
                pattern(
                    r"(?i)\b(?:odometer|odo)\s+(?:end|final)\s*(?:is|was|:|at)?\s*(?P<endOdometer>\d[\d,]*(?:\.\d+)?)",
                ),
            ],
        ),
        rule(
            RuleKind::Distance,
            Stage::Odometer,
            &[Distance],
            vec![
                pattern(
                    r"(?i)\b(?:distance\s*(?:is|was|:)|total\s+distance(?:\s+(?:is|was|:))?)\s*(?P<distance>\d+(?:\.\d+)?)\s*{UNIT}",
                ),
                pattern(
                    r"(?i)\b(?:drove|traveled|travelled|went)\s+(?P<distance>\d+(?:\.\d+)?)\s*{UNIT}",
                ),
            ],
        )
        .suppressed_by(ODOMETERS),
        rule(
            RuleKind::BareDistance,
            Stage::Odometer,
            &[Distance],
            vec![guarded(
                r"(?i)\b(?P<distance>\d+(?:\.\d+)?)\s*{UNIT}",
                no_odometer_mention,
            )],
        )
        .suppressed_by(ODOMETERS),
        rule(
            RuleKind::UnitNumber,
            Stage::Identifier,
            &[UnitNumber],
            vec![guarded(
                r"(?i)\b(?:unit|apartment|apt|building|bldg|suite|room|floor)\b\.?\s*(?:number\s*)?(?:is\s*)?#?\s*(?P<unitNumber>[a-z0-9]+(?:-[a-z0-9]+)?)\b",
                unit_like,
            )],
        ),
        rule(
            RuleKind::OrderNumber,
            Stage::Identifier,
            &[OrderNumber],
            vec![
                guarded(
                    r"(?i)\b(?:(?:order|delivery|trip)\s+(?:number|id|code)|confirmation(?:\s+(?:number|code))?|tracking(?:\s+(?:number|code))?|reference(?:\s+(?:number|code))?)\s*(?:is\s*)?:?\s*#?\s*(?P<orderNumber>[a-z0-9]+(?:-[a-z0-9]+)*)\b",
                    has_digit,
                ),
                guarded(
                    r"(?i)\b(?:order|delivery|trip)\s*#\s*(?P<orderNumber>[a-z0-9]+(?:-[a-z0-9]+)*)",
                    has_digit,
                ),
            ],
        ),
        rule(
            RuleKind::Pay,
            Stage::MoneyFallback,
            &[Pay],
            vec![
                guarded(
                    r"(?i)\b(?:pay(?:ment|out)?\s*(?:is|was|:)|paid|made|earned|amount\s*(?:is|was|:)|total\s*(?:is|was|:))\s*\$?(?P<pay>{MONEY})",
                    amount_like,
                ),
                pattern(r"(?i)\bpay(?:ment|out)?\s+\$?(?P<pay>{AMT})"),
                guarded(r"\$(?P<pay>{AMT})", no_money_qualifier_nearby),
                guarded(r"(?i)\b(?P<pay>{AMT})\s*{DOLLARS}\b", no_money_qualifier_nearby),
            ],
        ),
        rule(
            RuleKind::Tip,
            Stage::MoneyFallback,
            &[Tip],
            vec![
                guarded(
                    r"(?i)\b(?:(?:tip|gratuity)\s*(?:is|was|of|:)|tipped(?:\s+me)?|left\s+(?:a\s+)?tip\s+of)\s*\$?(?P<tip>{MONEY})",
                    amount_like,
                ),
                pattern(r"(?i)\b(?:tip|gratuity)\s+\$?(?P<tip>{AMT})"),
                pattern(r"(?i)\$?(?P<tip>{AMT})\s*(?:{DOLLARS}\s*)?(?:tip|gratuity)\b"),
                guarded(
                    r"(?i)\b(?P<tip>[a-z]+(?:-[a-z]+)?)\s+{DOLLARS}\s+(?:tip|gratuity)\b",
                    amount_like,
                ),
            ],
        ),
        rule(
            RuleKind::Bonus,
            Stage::MoneyFallback,
            &[Bonus],
            vec![
                guarded(
                    r"(?i)\b{BONUS}\s*(?:is|was|of|:)?\s*\$?(?P<bonus>{MONEY})",
                    amount_like,
                ),
                pattern(r"(?i)\$?(?P<bonus>{AMT})\s*(?:{DOLLARS}\s*)?{BONUS}\b"),
                guarded(
                    r"(?i)\b(?P<bonus>[a-z]+(?:-[a-z]+)?)\s+{DOLLARS}\s+{BONUS}\b",
                    amount_like,
                ),
            ],
        ),
        rule(
            RuleKind::Cash,
            Stage::MoneyFallback,
            &[Cash],
            vec![
                guarded(
                    r"(?i)\bcash(?:\s+(?:tip|payment))?\s*(?:is|was|of|:)\s*\$?(?P<cash>{MONEY})",
                    amount_like,
                ),
                pattern(r"(?i)\b(?:paid|paying)\s+(?:in\s+)?cash\s+\$?(?P<cash>{AMT})"),
                pattern(r"(?i)\$?(?P<cash>{AMT})\s*{DOLLARS}?\s+(?:in\s+)?cash\b"),
                guarded(
                    r"(?i)\b(?:given|received|got)\s+(?P<cash>[a-z]+(?:-[a-z]+)?)\s+(?:{DOLLARS}\s+)?(?:in\s+)?cash\b",
                    amount_like,
                ),
            ],
        ),
    ]
}

/// Text of the first participating capture group
fn first_capture<'t>(caps: &Captures<'t>) -> Option<&'t str> {
    caps.iter().skip(1).flatten().next().map(|m| m.as_str())
}

const SERVICE_STOPWORDS: [&str; 11] = [
    "address",
    "destination",
    "place",
    "type",
    "order",
    "unit",
    "pickup",
    "shop",
    "shopping",
    "delivery",
    "ride",
];

fn service_not_keyword(caps: &Captures<'_>, _text: &str) -> bool {
    let Some(first_word) = caps
        .name("service")
        .and_then(|m| m.as_str().split_whitespace().next())
    else {
        return false;
    };
    let lower = first_word.to_lowercase();
    !SERVICE_STOPWORDS.contains(&lower.as_str())
}

// Street numbers belong to the address rules
fn place_not_street_number(caps: &Captures<'_>, _text: &str) -> bool {
    caps.name("place")
        .and_then(|m| m.as_str().trim().chars().next())
        .map_or(false, |c| !c.is_ascii_digit())
}

fn amount_like(caps: &Captures<'_>, _text: &str) -> bool {
    let Some(value) = first_capture(caps) else {
        return false;
    };
    let value = value.trim();
    if value.starts_with(|c: char| c.is_ascii_digit()) {
        return true;
    }
    value
        .split_whitespace()
        .next()
        .map_or(false, |word| word.split('-').all(is_number_word))
}

fn no_odometer_mention(_caps: &Captures<'_>, text: &str) -> bool {
    !ODOMETER_MENTION.is_match(text)
}

fn unit_like(caps: &Captures<'_>, _text: &str) -> bool {
    first_capture(caps).map_or(false, |value| {
        value.chars().any(|c| c.is_ascii_digit()) || value.len() <= 2 || is_number_word(value)
    })
}

fn has_digit(caps: &Captures<'_>, _text: &str) -> bool {
    first_capture(caps).map_or(false, |value| value.chars().any(|c| c.is_ascii_digit()))
}

/// How far either side of a bare amount to look for "tip", "bonus" or "cash"
const QUALIFIER_WINDOW: usize = 20;

fn no_money_qualifier_nearby(caps: &Captures<'_>, text: &str) -> bool {
    let Some(whole) = caps.get(0) else {
        return false;
    };
    // Stop at the neighbouring amount so its qualifier is not borrowed
    let stop = |c: &char| c.is_ascii_digit() || *c == '$';

    let mut before: Vec<char> = text[..whole.start()]
        .chars()
        .rev()
        .take_while(|c| !stop(c))
        .take(QUALIFIER_WINDOW)
        .collect();
    before.reverse();
    let before: String = before.into_iter().collect();
    let after: String = text[whole.end()..]
        .chars()
        .take_while(|c| !stop(c))
        .take(QUALIFIER_WINDOW)
        .collect();

    !MONEY_QUALIFIER.is_match(&before) && !MONEY_QUALIFIER.is_match(&after)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule_of(kind: RuleKind) -> &'static Rule {
        RULES
            .iter()
            .find(|r| r.kind == kind)
            .expect("rule missing from table")
    }

    fn capture(kind: RuleKind, text: &str, field: Field) -> Option<String> {
        rule_of(kind)
            .find(text)
            .and_then(|caps| caps.name(field.key()).map(|m| m.as_str().to_string()))
    }

    #[test]
    fn test_table_compiles_in_stage_order() {
        assert!(!RULES.is_empty());
        assert!(RULES.windows(2).all(|w| w[0].stage <= w[1].stage));
        assert!(RULES.iter().all(|r| !r.patterns.is_empty()));
    }

    #[test]
    fn test_named_groups_match_declared_fields() {
        for rule in RULES.iter() {
            for pattern in &rule.patterns {
                for name in pattern.regex.capture_names().flatten() {
                    assert!(
                        rule.fields.iter().any(|f| f.key() == name),
                        "{:?} captures undeclared group {}",
                        rule.kind,
                        name
                    );
                }
            }
        }
    }

    #[test]
    fn test_only_distance_rules_yield_to_odometers() {
        for rule in RULES.iter() {
            let expected = matches!(rule.kind, RuleKind::Distance | RuleKind::BareDistance);
            assert_eq!(rule.suppressed_by == ODOMETERS, expected, "{:?}", rule.kind);
            assert!(expected || rule.suppressed_by.is_empty(), "{:?}", rule.kind);
        }
    }

    #[test]
    fn test_place_type_after_leading_amount() {
        let text = "tip is $3, McDonald's pickup";
        assert_eq!(capture(RuleKind::PlaceType, text, Field::Place).as_deref(), Some("McDonald's"));
        assert_eq!(capture(RuleKind::PlaceType, text, Field::Type).as_deref(), Some("pickup"));
        assert!(rule_of(RuleKind::PlaceType).find("12 pickup").is_none());
    }

    #[test]
    fn test_pay_tip_bonus_capture() {
        let text = "pay is $15, tip $3, and bonus $2";
        assert_eq!(capture(RuleKind::PayTipBonus, text, Field::Pay).as_deref(), Some("15"));
        assert_eq!(capture(RuleKind::PayTipBonus, text, Field::Tip).as_deref(), Some("3"));
        assert_eq!(capture(RuleKind::PayTipBonus, text, Field::Bonus).as_deref(), Some("2"));
    }

    #[test]
    fn test_pay_and_bonus_without_tip() {
        let text = "pay $18 and peak pay $2.50";
        let caps = rule_of(RuleKind::PayTipBonus).find(text).expect("no match");
        assert_eq!(caps.name("pay").map(|m| m.as_str()), Some("18"));
        assert!(caps.name("tip").is_none());
        assert_eq!(caps.name("bonus").map(|m| m.as_str()), Some("2.50"));
    }

    #[test]
    fn test_bare_distance_guard() {
        assert_eq!(
            capture(RuleKind::BareDistance, "drove about 5 miles", Field::Distance).as_deref(),
            Some("5")
        );
        assert!(rule_of(RuleKind::BareDistance)
            .find("start odometer is 50000 and 5 miles")
            .is_none());
    }

    #[test]
    fn test_bare_dollar_skips_qualified_amounts() {
        assert!(rule_of(RuleKind::Pay).find("tip $3").is_none());
        assert!(rule_of(RuleKind::Pay).find("got $4 in cash").is_none());
        assert_eq!(capture(RuleKind::Pay, "got $12 today", Field::Pay).as_deref(), Some("12"));
    }

    #[test]
    fn test_place_leaves_street_numbers_to_addresses() {
        assert!(rule_of(RuleKind::Place).find("picking up at 123 Main St").is_none());
        assert_eq!(
            capture(RuleKind::PickupAddress, "picking up at 123 Main St", Field::PickupAddress)
                .as_deref(),
            Some("123 Main St")
        );
    }

    #[test]
    fn test_service_keyword_guard() {
        assert!(rule_of(RuleKind::Service).find("got a pickup").is_none());
        assert_eq!(
            capture(RuleKind::Service, "I have a DoorDash", Field::Service).as_deref(),
            Some("DoorDash")
        );
    }

    #[test]
    fn test_unit_requires_number_like_value() {
        assert_eq!(capture(RuleKind::UnitNumber, "unit 5B", Field::UnitNumber).as_deref(), Some("5B"));
        assert!(rule_of(RuleKind::UnitNumber).find("the building entrance").is_none());
    }
}
