use crate::advisor::taste::{Method, TasteTag};
use crate::advisor::{AdjustmentType, BrewParams, Recommendation};

// Fixed tuning constants. These are the decision table, not configuration.
const SOUR_YIELD_FACTOR: f64 = 1.15;
const BITTER_YIELD_FACTOR: f64 = 0.90;
const SALTY_YIELD_FACTOR: f64 = 1.2;
const FILTER_TEMP_LOW_C: f64 = 93.0;
const FILTER_TEMP_HIGH_C: f64 = 96.0;
const CHOKED_FLOW_G_PER_S: f64 = 1.0;
const LONG_RATIO: f64 = 2.5;

/// Maps a reported taste plus the current brew parameters to a single
/// static recommendation. Pure and deterministic: no I/O, no state, and
/// it never fails — degenerate inputs degrade to defined fallbacks.
///
/// `taste` of `None` stands for an unrecognized or not-yet-selected tag
/// and yields the neutral "keep tasting" result.
pub fn evaluate(taste: Option<TasteTag>, params: &BrewParams) -> Recommendation {
    let metrics = params.metrics();
    let yield_out = params.yield_out_g();
    let temperature = params.temperature_c();
    let method = params.method;

    let Some(taste) = taste else {
        return Recommendation {
            kind: AdjustmentType::None,
            message: "Keep tasting...".to_string(),
            detail: None,
            icon: "cup".to_string(),
            metrics,
        };
    };

    match taste {
        TasteTag::Balanced => Recommendation {
            kind: AdjustmentType::None,
            message: "Perfect! Enjoy.".to_string(),
            detail: None,
            icon: "magic".to_string(),
            metrics,
        },
        TasteTag::Sour => {
            // Filter brews under temperature get a temp adjustment first.
            // A temperature of 0 means "not entered" and skips the branch.
            if method == Method::Filter
                && temperature > 0.0
                && temperature < FILTER_TEMP_LOW_C
            {
                return Recommendation {
                    kind: AdjustmentType::Temp,
                    message: "Increase Temp & Yield.".to_string(),
                    detail: Some(format!(
                        "Water at {temperature:.0}\u{b0}C is under-extracting. \
                         Brew closer to {FILTER_TEMP_LOW_C:.0}\u{b0}C and pour longer."
                    )),
                    icon: "fix".to_string(),
                    metrics,
                };
            }
            Recommendation {
                kind: AdjustmentType::Ratio,
                message: yield_target_message("Increase Yield", yield_out, SOUR_YIELD_FACTOR),
                detail: Some(
                    "Under-extracted. If you cannot stretch the shot, grind finer or use hotter water."
                        .to_string(),
                ),
                icon: "lemon".to_string(),
                metrics,
            }
        }
        TasteTag::Bitter => {
            let message = if method == Method::Filter && temperature >= FILTER_TEMP_HIGH_C {
                "Lower Temp & Decrease Yield.".to_string()
            } else {
                yield_target_message("Decrease Yield", yield_out, BITTER_YIELD_FACTOR)
            };
            Recommendation {
                kind: AdjustmentType::Ratio,
                message,
                detail: Some(
                    "Over-extracted. Cutting the brew shorter pulls less of the harsh late fraction."
                        .to_string(),
                ),
                icon: "chocolate".to_string(),
                metrics,
            }
        }
        TasteTag::Astringent => {
            let choked = method == Method::Espresso
                && metrics.flow_rate > 0.0
                && metrics.flow_rate < CHOKED_FLOW_G_PER_S;
            let message = if choked {
                "CHOKED: Grind Coarser Immediately.".to_string()
            } else {
                "Grind Coarser.".to_string()
            };
            let detail = if choked {
                Some(format!(
                    "Flow is {:.1} g/s; the puck is fighting the machine and channeling.",
                    metrics.flow_rate
                ))
            } else {
                Some("Astringency usually means channeling. A coarser grind evens out the bed.".to_string())
            };
            Recommendation {
                kind: AdjustmentType::Grind,
                message,
                detail,
                icon: "cactus".to_string(),
                metrics,
            }
        }
        TasteTag::Weak => {
            if method == Method::Espresso && metrics.ratio > LONG_RATIO {
                return Recommendation {
                    kind: AdjustmentType::Ratio,
                    message: "Decrease Yield (Shorten Ratio).".to_string(),
                    detail: Some(format!(
                        "Ratio 1:{:.1} is long for espresso; stop the shot earlier for more concentration.",
                        metrics.ratio
                    )),
                    icon: "water".to_string(),
                    metrics,
                };
            }
            Recommendation {
                kind: AdjustmentType::Ratio,
                message: "Increase Dose +1g.".to_string(),
                detail: Some("More coffee in the basket raises strength without changing extraction much.".to_string()),
                icon: "water".to_string(),
                metrics,
            }
        }
        TasteTag::Muddled => {
            let message = if metrics.flow_rate > 0.0 {
                format!(
                    "Grind Coarser & Aim for Faster Flow (now {:.1} g/s).",
                    metrics.flow_rate
                )
            } else {
                "Grind Coarser & Aim for Faster Flow.".to_string()
            };
            Recommendation {
                kind: AdjustmentType::Grind,
                message,
                detail: Some("Muddled cups lack clarity; faster flow separates the flavors.".to_string()),
                icon: "ghost".to_string(),
                metrics,
            }
        }
        TasteTag::Salty => Recommendation {
            kind: AdjustmentType::Ratio,
            message: yield_target_message(
                "Increase Yield Significantly",
                yield_out,
                SALTY_YIELD_FACTOR,
            ),
            detail: Some("Saltiness is severe under-extraction; push the brew much further.".to_string()),
            icon: "salt".to_string(),
            metrics,
        },
        TasteTag::Hollow => Recommendation {
            kind: AdjustmentType::Ratio,
            message: "Increase Dose (More Coffee).".to_string(),
            detail: Some("A hollow middle usually means there is not enough coffee in the cup.".to_string()),
            icon: "ghost".to_string(),
            metrics,
        },
        TasteTag::Strong => Recommendation {
            kind: AdjustmentType::Ratio,
            message: "Decrease Dose or Increase Yield.".to_string(),
            detail: Some("Too concentrated. Either less coffee in, or more water through.".to_string()),
            icon: "muscle".to_string(),
            metrics,
        },
    }
}

/// Builds "<verb> to ~Ng." with the gram target rounded half-up. With no
/// usable yield there is no target to cite, so the wording stays
/// directional.
fn yield_target_message(verb: &str, yield_out: f64, factor: f64) -> String {
    if yield_out > 0.0 {
        let target = (yield_out * factor).round();
        if verb.ends_with("Significantly") {
            format!("{verb} (~{target:.0}g).")
        } else {
            format!("{verb} to ~{target:.0}g.")
        }
    } else {
        format!("{verb}.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::taste::GoalTag;

    fn espresso(dose: &str, yield_g: &str, time: &str) -> BrewParams {
        BrewParams {
            dose: some(dose),
            yield_g: some(yield_g),
            time: some(time),
            temperature: None,
            method: Method::Espresso,
            goal: GoalTag::Fix,
        }
    }

    fn filter(dose: &str, yield_g: &str, temperature: &str) -> BrewParams {
        BrewParams {
            dose: some(dose),
            yield_g: some(yield_g),
            time: None,
            temperature: some(temperature),
            method: Method::Filter,
            goal: GoalTag::Fix,
        }
    }

    fn some(raw: &str) -> Option<String> {
        if raw.is_empty() {
            None
        } else {
            Some(raw.to_string())
        }
    }

    #[test]
    fn balanced_ignores_all_params() {
        for params in [
            espresso("18", "36", "28"),
            filter("15", "250", "85"),
            BrewParams::default(),
        ] {
            let rec = evaluate(Some(TasteTag::Balanced), &params);
            assert_eq!(rec.kind, AdjustmentType::None);
            assert_eq!(rec.message, "Perfect! Enjoy.");
            assert_eq!(rec.icon, "magic");
        }
    }

    #[test]
    fn evaluation_is_deterministic() {
        let params = espresso("18", "36", "28");
        let first = evaluate(Some(TasteTag::Sour), &params);
        let second = evaluate(Some(TasteTag::Sour), &params);
        assert_eq!(first, second);
    }

    #[test]
    fn sour_espresso_targets_higher_yield() {
        let rec = evaluate(Some(TasteTag::Sour), &espresso("18", "36", "28"));
        assert_eq!(rec.kind, AdjustmentType::Ratio);
        assert_eq!(rec.message, "Increase Yield to ~41g.");
        assert!((rec.metrics.ratio - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn sour_cool_filter_becomes_temp_advice() {
        let rec = evaluate(Some(TasteTag::Sour), &filter("15", "250", "90"));
        assert_eq!(rec.kind, AdjustmentType::Temp);
        assert_eq!(rec.message, "Increase Temp & Yield.");
        assert!(rec.detail.as_deref().unwrap().contains("93"));
    }

    #[test]
    fn sour_filter_without_temperature_keeps_ratio_advice() {
        let mut params = filter("15", "250", "");
        params.temperature = None;
        let rec = evaluate(Some(TasteTag::Sour), &params);
        assert_eq!(rec.kind, AdjustmentType::Ratio);
    }

    #[test]
    fn bitter_targets_lower_yield() {
        let rec = evaluate(Some(TasteTag::Bitter), &espresso("18", "40", "30"));
        assert_eq!(rec.kind, AdjustmentType::Ratio);
        assert_eq!(rec.message, "Decrease Yield to ~36g.");
    }

    #[test]
    fn bitter_hot_filter_mentions_temperature() {
        let rec = evaluate(Some(TasteTag::Bitter), &filter("15", "250", "97"));
        assert_eq!(rec.message, "Lower Temp & Decrease Yield.");
    }

    #[test]
    fn choked_espresso_is_flagged() {
        // 20g over 35s is 0.57 g/s, well under the 1.0 g/s choke line.
        let rec = evaluate(Some(TasteTag::Astringent), &espresso("18", "20", "35"));
        assert_eq!(rec.kind, AdjustmentType::Grind);
        assert_eq!(rec.message, "CHOKED: Grind Coarser Immediately.");
    }

    #[test]
    fn astringent_filter_gets_plain_grind_advice() {
        let rec = evaluate(Some(TasteTag::Astringent), &filter("15", "250", "92"));
        assert_eq!(rec.message, "Grind Coarser.");
    }

    #[test]
    fn astringent_without_time_is_not_choked() {
        let rec = evaluate(Some(TasteTag::Astringent), &espresso("18", "20", ""));
        assert_eq!(rec.message, "Grind Coarser.");
    }

    #[test]
    fn weak_long_espresso_shortens_ratio() {
        let rec = evaluate(Some(TasteTag::Weak), &espresso("18", "50", "30"));
        assert_eq!(rec.message, "Decrease Yield (Shorten Ratio).");
    }

    #[test]
    fn weak_normal_ratio_adds_dose() {
        let rec = evaluate(Some(TasteTag::Weak), &espresso("18", "36", "30"));
        assert_eq!(rec.message, "Increase Dose +1g.");
    }

    #[test]
    fn muddled_cites_flow_when_known() {
        let rec = evaluate(Some(TasteTag::Muddled), &espresso("18", "36", "40"));
        assert_eq!(rec.message, "Grind Coarser & Aim for Faster Flow (now 0.9 g/s).");

        let rec = evaluate(Some(TasteTag::Muddled), &espresso("18", "36", ""));
        assert_eq!(rec.message, "Grind Coarser & Aim for Faster Flow.");
    }

    #[test]
    fn salty_pushes_yield_hard() {
        let rec = evaluate(Some(TasteTag::Salty), &espresso("18", "30", "25"));
        assert_eq!(rec.message, "Increase Yield Significantly (~36g).");
    }

    #[test]
    fn hollow_and_strong_are_ratio_advice() {
        let rec = evaluate(Some(TasteTag::Hollow), &espresso("18", "36", "28"));
        assert_eq!(rec.message, "Increase Dose (More Coffee).");
        let rec = evaluate(Some(TasteTag::Strong), &espresso("18", "36", "28"));
        assert_eq!(rec.message, "Decrease Dose or Increase Yield.");
    }

    #[test]
    fn unknown_taste_falls_back_to_neutral() {
        let rec = evaluate(None, &espresso("18", "36", "28"));
        assert_eq!(rec.kind, AdjustmentType::None);
        assert_eq!(rec.message, "Keep tasting...");
        assert_eq!(rec.icon, "cup");
    }

    #[test]
    fn missing_yield_keeps_directional_wording() {
        let rec = evaluate(Some(TasteTag::Sour), &espresso("18", "", ""));
        assert_eq!(rec.message, "Increase Yield.");
        assert_eq!(rec.metrics.ratio, 0.0);
    }
}
