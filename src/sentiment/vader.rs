use crate::error::{Error, Result};
use crate::sentiment::lexicon::Lexicon;
use crate::sentiment::scorer::SentimentScorer;

const B_INCR: f64 = 0.293;
const B_DECR: f64 = -0.293;
const C_INCR: f64 = 0.733;
const N_SCALAR: f64 = -0.74;
const NORMALIZATION_ALPHA: f64 = 15.0;

const NEGATE: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt", "ain't",
    "aren't", "can't", "couldn't", "daren't", "didn't", "doesn't", "dont", "hadnt", "hasnt",
    "havent", "isnt", "mightnt", "mustnt", "neither", "don't", "hadn't", "hasn't", "haven't",
    "isn't", "mightn't", "mustn't", "neednt", "needn't", "never", "none", "nope", "nor", "not",
    "nothing", "nowhere", "oughtnt", "shant", "shouldnt", "uhuh", "wasnt", "werent",
    "oughtn't", "shan't", "shouldn't", "uh-uh", "wasn't", "weren't", "without", "wont",
    "wouldnt", "won't", "wouldn't", "rarely", "seldom", "despite",
];

fn booster(word: &str) -> Option<f64> {
    match word {
        "absolutely" | "amazingly" | "awfully" | "completely" | "considerable"
        | "considerably" | "decidedly" | "deeply" | "effing" | "enormous" | "enormously"
        | "entirely" | "especially" | "exceptional" | "exceptionally" | "extreme"
        | "extremely" | "fabulously" | "flipping" | "flippin" | "frackin" | "fracking"
        | "fricking" | "frickin" | "frigging" | "friggin" | "fully" | "fuckin" | "fucking"
        | "fuggin" | "fugging" | "greatly" | "hella" | "highly" | "hugely" | "incredible"
        | "incredibly" | "intensely" | "major" | "majorly" | "more" | "most" | "particularly"
        | "purely" | "quite" | "really" | "remarkably" | "so" | "substantially"
        | "thoroughly" | "total" | "totally" | "tremendous" | "tremendously" | "uber"
        | "unbelievably" | "unusually" | "utter" | "utterly" | "very" => Some(B_INCR),
        "almost" | "barely" | "hardly" | "just enough" | "kind of" | "kinda" | "kindof"
        | "kind-of" | "less" | "little" | "marginal" | "marginally" | "occasional"
        | "occasionally" | "partly" | "scarce" | "scarcely" | "slight" | "slightly"
        | "somewhat" | "sort of" | "sorta" | "sortof" | "sort-of" => Some(B_DECR),
        _ => None,
    }
}

fn special_idiom(phrase: &str) -> Option<f64> {
    match phrase {
        "the shit" | "the bomb" | "to die for" => Some(3.0),
        "bad ass" | "badass" => Some(1.5),
        "bus stop" => Some(0.0),
        "yeah right" | "hand to mouth" => Some(-2.0),
        "kiss of death" => Some(-1.5),
        "cut the mustard" => Some(2.0),
        "beating heart" => Some(3.1),
        "broken heart" => Some(-2.9),
        _ => None,
    }
}

/// Sentiment proportions and compound score of one text.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PolarityScores {
    pub neg: f64,
    pub neu: f64,
    pub pos: f64,
    pub compound: f64,
}

pub struct VaderScorer {
    lexicon: Lexicon,
}

impl VaderScorer {
    pub fn new(lexicon: Lexicon) -> Result<Self> {
        if lexicon.is_empty() {
            return Err(Error::ResourceUnavailable(
                "cannot build a scorer from an empty lexicon".to_string(),
            ));
        }
        Ok(Self { lexicon })
    }

    pub fn polarity_scores(&self, text: &str) -> PolarityScores {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return PolarityScores::default();
        }

        let lowered: Vec<String> = tokens.iter().map(|t| t.to_lowercase()).collect();
        let cap_differential = allcap_differential(&tokens);

        let mut sentiments = Vec::with_capacity(tokens.len());
        for (i, word) in lowered.iter().enumerate() {
            if booster(word).is_some() {
                sentiments.push(0.0);
                continue;
            }
            if word == "kind" && lowered.get(i + 1).map(String::as_str) == Some("of") {
                sentiments.push(0.0);
                continue;
            }
            sentiments.push(self.sentiment_valence(&tokens, &lowered, i, cap_differential));
        }

        but_check(&lowered, &mut sentiments);
        score_valence(&sentiments, text)
    }

    fn sentiment_valence(
        &self,
        tokens: &[&str],
        lowered: &[String],
        i: usize,
        cap_differential: bool,
    ) -> f64 {
        let word = lowered[i].as_str();
        let Some(base) = self.lexicon.valence(word) else {
            return 0.0;
        };
        let mut valence = base;

        // "no" directly before another lexicon word acts as a negator, not a sentiment
        if word == "no"
            && lowered
                .get(i + 1)
                .map(|next| self.lexicon.contains(next))
                .unwrap_or(false)
        {
            valence = 0.0;
        }

        if (i > 0 && lowered[i - 1] == "no")
            || (i > 1 && lowered[i - 2] == "no")
            || (i > 2 && lowered[i - 3] == "no" && matches!(lowered[i - 1].as_str(), "or" | "nor"))
        {
            valence = base * N_SCALAR;
        }

        if cap_differential && is_upper(tokens[i]) {
            if valence > 0.0 {
                valence += C_INCR;
            } else {
                valence -= C_INCR;
            }
        }

        for start_i in 0..3 {
            if i <= start_i {
                break;
            }
            let prior = i - (start_i + 1);
            if self.lexicon.contains(&lowered[prior]) {
                continue;
            }

            let mut scalar = scalar_inc_dec(tokens[prior], &lowered[prior], valence, cap_differential);
            if start_i == 1 && scalar != 0.0 {
                scalar *= 0.95;
            }
            if start_i == 2 && scalar != 0.0 {
                scalar *= 0.9;
            }
            valence += scalar;
            valence = negation_check(valence, lowered, start_i, i);
            if start_i == 2 {
                valence = special_idioms_check(valence, lowered, i);
            }
        }

        self.least_check(valence, lowered, i)
    }

    fn least_check(&self, valence: f64, lowered: &[String], i: usize) -> f64 {
        if i > 1 && lowered[i - 1] == "least" && !self.lexicon.contains("least") {
            if lowered[i - 2] != "at" && lowered[i - 2] != "very" {
                return valence * N_SCALAR;
            }
        } else if i > 0 && lowered[i - 1] == "least" && !self.lexicon.contains("least") {
            return valence * N_SCALAR;
        }
        valence
    }
}

impl SentimentScorer for VaderScorer {
    fn compound(&self, text: &str) -> f64 {
        self.polarity_scores(text).compound
    }

    fn name(&self) -> &str {
        "vader"
    }
}

/// Whitespace tokens longer than one character. Single characters such as
/// "I" or "a" take no part in caps emphasis or the lookback windows.
fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace()
        .filter(|token| token.chars().count() > 1)
        .map(strip_punctuation)
        .collect()
}

/// Keeps the token intact when stripping would leave one character or less,
/// so emoticons such as ":)" survive.
fn strip_punctuation(token: &str) -> &str {
    let stripped = token.trim_matches(|c: char| c.is_ascii_punctuation());
    if stripped.chars().count() <= 1 {
        token
    } else {
        stripped
    }
}

/// True when the token has cased characters and all of them are uppercase.
fn is_upper(token: &str) -> bool {
    let mut cased = false;
    for c in token.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            cased = true;
        }
    }
    cased
}

/// True when some, but not all, tokens are ALL CAPS.
fn allcap_differential(tokens: &[&str]) -> bool {
    let caps = tokens.iter().filter(|t| is_upper(t)).count();
    caps > 0 && caps < tokens.len()
}

fn is_negated(word: &str) -> bool {
    NEGATE.contains(&word) || word.contains("n't")
}

fn scalar_inc_dec(token: &str, lowered: &str, valence: f64, cap_differential: bool) -> f64 {
    let Some(mut scalar) = booster(lowered) else {
        return 0.0;
    };
    if valence < 0.0 {
        scalar = -scalar;
    }
    if cap_differential && is_upper(token) {
        if valence > 0.0 {
            scalar += C_INCR;
        } else {
            scalar -= C_INCR;
        }
    }
    scalar
}

fn negation_check(valence: f64, lowered: &[String], start_i: usize, i: usize) -> f64 {
    let is_so_or_this = |w: &str| w == "so" || w == "this";

    match start_i {
        0 => {
            if is_negated(&lowered[i - 1]) {
                return valence * N_SCALAR;
            }
        }
        1 => {
            if lowered[i - 2] == "never" && is_so_or_this(lowered[i - 1].as_str()) {
                return valence * 1.25;
            } else if lowered[i - 2] == "without" && lowered[i - 1] == "doubt" {
                return valence;
            } else if is_negated(&lowered[i - 2]) {
                return valence * N_SCALAR;
            }
        }
        2 => {
            if lowered[i - 3] == "never"
                && (is_so_or_this(lowered[i - 2].as_str()) || is_so_or_this(lowered[i - 1].as_str()))
            {
                return valence * 1.25;
            } else if lowered[i - 3] == "without"
                && (lowered[i - 2] == "doubt" || lowered[i - 1] == "doubt")
            {
                return valence;
            } else if is_negated(&lowered[i - 3]) {
                return valence * N_SCALAR;
            }
        }
        _ => {}
    }
    valence
}

fn special_idioms_check(mut valence: f64, lowered: &[String], i: usize) -> f64 {
    let n = lowered.len();
    let onezero = format!("{} {}", lowered[i - 1], lowered[i]);
    let twoonezero = format!("{} {} {}", lowered[i - 2], lowered[i - 1], lowered[i]);
    let twoone = format!("{} {}", lowered[i - 2], lowered[i - 1]);
    let threetwoone = format!("{} {} {}", lowered[i - 3], lowered[i - 2], lowered[i - 1]);
    let threetwo = format!("{} {}", lowered[i - 3], lowered[i - 2]);

    if let Some(idiom) = [&onezero, &twoonezero, &twoone, &threetwoone, &threetwo]
        .iter()
        .find_map(|seq| special_idiom(seq))
    {
        valence = idiom;
    }

    if i + 1 < n {
        let zeroone = format!("{} {}", lowered[i], lowered[i + 1]);
        if let Some(idiom) = special_idiom(&zeroone) {
            valence = idiom;
        }
    }
    if i + 2 < n {
        let zeroonetwo = format!("{} {} {}", lowered[i], lowered[i + 1], lowered[i + 2]);
        if let Some(idiom) = special_idiom(&zeroonetwo) {
            valence = idiom;
        }
    }

    for ngram in [&threetwoone, &threetwo, &twoone] {
        if let Some(scalar) = booster(ngram) {
            valence += scalar;
        }
    }
    valence
}

/// Dampens sentiment before the first "but" and amplifies it after.
fn but_check(lowered: &[String], sentiments: &mut [f64]) {
    let Some(but_index) = lowered.iter().position(|w| w == "but") else {
        return;
    };
    for (idx, sentiment) in sentiments.iter_mut().enumerate() {
        if idx < but_index {
            *sentiment *= 0.5;
        } else if idx > but_index {
            *sentiment *= 1.5;
        }
    }
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(4) as f64;
    let questions = text.matches('?').count();
    let question_amplifier = match questions {
        0 | 1 => 0.0,
        2 | 3 => questions as f64 * 0.18,
        _ => 0.96,
    };
    exclamations * 0.292 + question_amplifier
}

fn normalize(score: f64) -> f64 {
    (score / (score * score + NORMALIZATION_ALPHA).sqrt()).clamp(-1.0, 1.0)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn score_valence(sentiments: &[f64], text: &str) -> PolarityScores {
    if sentiments.is_empty() {
        return PolarityScores::default();
    }

    let amplifier = punctuation_emphasis(text);
    let mut sum: f64 = sentiments.iter().sum();
    if sum > 0.0 {
        sum += amplifier;
    } else if sum < 0.0 {
        sum -= amplifier;
    }
    let compound = normalize(sum);

    let mut positive = 0.0;
    let mut negative = 0.0;
    let mut neutral = 0usize;
    for &s in sentiments {
        if s > 0.0 {
            positive += s + 1.0;
        } else if s < 0.0 {
            negative += s - 1.0;
        } else {
            neutral += 1;
        }
    }

    if positive > negative.abs() {
        positive += amplifier;
    } else if positive < negative.abs() {
        negative -= amplifier;
    }

    let total = positive + negative.abs() + neutral as f64;
    PolarityScores {
        neg: round_to((negative / total).abs(), 3),
        neu: round_to(neutral as f64 / total, 3),
        pos: round_to((positive / total).abs(), 3),
        compound: round_to(compound, 4),
    }
}
