//! Muscle-group correction templates for intense expressions.
//!
//! Each template names what a genuine expression does to the face, which
//! muscles produce it and the concrete edits an expert should make.

use crate::signal::expression::ExpressionType;

/// Correction template for one expression type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpressionTemplate {
    pub positive: &'static str,
    pub negative: &'static str,
    pub preservation: &'static str,
    pub muscles: &'static [&'static str],
    pub steps: &'static [&'static str],
}

/// Identity clause shared by every template.
const TEMPLATE_PRESERVATION: &str = "maintain overall face shape and identity, preserve hair style, \
     keep same clothing and background, maintain skin tone";

/// Denoising used for template-based corrections.
pub const TEMPLATE_DENOISING: f64 = 0.28;

/// Denoising used for the generic correction when no template exists.
pub const GENERIC_CORRECTION_DENOISING: f64 = 0.25;

/// Allowed denoising band for expression corrections.
pub const CORRECTION_DENOISING_BAND: (f64, f64) = (0.25, 0.35);

static BIG_LAUGH: ExpressionTemplate = ExpressionTemplate {
    positive: "Duchenne smile with genuine eye involvement, \
         crow's feet wrinkles at eye corners from orbicularis oculi contraction, \
         raised apple cheeks from zygomatic major muscle, \
         deepened nasolabial folds extending outward, \
         natural upper teeth exposure with realistic gum line, \
         eye squint from orbicularis oculi engagement, \
         slight chin dimpling from mentalis muscle",
    negative: "fake smile, eyes wide open while laughing, flat cheeks, \
         missing crow's feet, perfectly symmetrical smile, \
         unnatural teeth alignment, plastic expression, stiff smile",
    preservation: TEMPLATE_PRESERVATION,
    muscles: &[
        "orbicularis_oculi",
        "zygomatic_major",
        "risorius",
        "levator_labii",
        "mentalis",
    ],
    steps: &[
        "Add crow's feet at the eye corners (orbicularis oculi contraction)",
        "Lift the apple cheeks over the cheekbones",
        "Deepen the nasolabial folds and correct their direction",
        "Make the tooth exposure look natural",
        "Add faint chin dimpling from the mentalis",
    ],
};

static CRYING: ExpressionTemplate = ExpressionTemplate {
    positive: "corrugator muscle engagement creating vertical frown lines between eyebrows, \
         reddened eye rims and tear duct area, swollen lower eyelids, \
         reddened nose tip from blood flow, contracted nasal ala, \
         mouth corners pulled down by depressor anguli oris, \
         everted lower lip with slight tremor, \
         chin dimpling and orange-peel texture from mentalis contraction, \
         realistic tear tracks on skin with proper light reflection",
    negative: "fake crying, dry eyes with artificial tears, normal colored nose, \
         smooth chin without texture, perfectly shaped tears, \
         symmetrical crying face, plastic sadness, stiff mouth",
    preservation: TEMPLATE_PRESERVATION,
    muscles: &[
        "corrugator",
        "depressor_anguli_oris",
        "mentalis",
        "orbicularis_oris",
        "procerus",
    ],
    steps: &[
        "Add vertical frown lines between the brows (corrugator contraction)",
        "Redden and swell the eye rims",
        "Redden the tip of the nose",
        "Correct the downward pull of the mouth corners",
        "Add orange-peel chin texture (mentalis contraction)",
    ],
};

static SURPRISE: ExpressionTemplate = ExpressionTemplate {
    positive: "frontalis muscle creating horizontal forehead wrinkles, \
         raised eyebrows in natural arc shape, \
         widened eyes showing more sclera above and below iris, \
         dropped jaw with oval mouth shape, relaxed lips, \
         natural asymmetry in expression",
    negative: "smooth forehead while surprised, perfect round eyes, \
         too symmetrical surprise, stiff expression, \
         unnatural eyebrow shape",
    preservation: TEMPLATE_PRESERVATION,
    muscles: &["frontalis", "levator_palpebrae"],
    steps: &[
        "Add horizontal forehead lines (frontalis contraction)",
        "Adjust the eyebrow arc",
        "Make the widened eyes look natural",
        "Reshape the mouth into a relaxed oval",
    ],
};

static ANGER: ExpressionTemplate = ExpressionTemplate {
    positive: "strong corrugator and procerus muscle contraction creating deep glabellar lines, \
         lowered and drawn-together eyebrows, \
         tense upper eyelids with intense stare, narrowed eyes, \
         flared nostrils from dilator naris, \
         tightened lip line or teeth-baring snarl, \
         tensed masseter muscle creating defined jaw line",
    negative: "relaxed face while angry, normal nostrils, soft jaw line, \
         wide open eyes while angry, smooth forehead, \
         stiff expression, fake anger",
    preservation: TEMPLATE_PRESERVATION,
    muscles: &[
        "corrugator",
        "procerus",
        "dilator_naris",
        "masseter",
        "orbicularis_oris",
    ],
    steps: &[
        "Deepen the glabellar lines between the brows",
        "Flare the nostrils",
        "Tense the masseter along the jaw",
        "Sharpen the glaring stare",
    ],
};

/// Template for an expression type, if one exists.
pub fn expression_template(expression_type: ExpressionType) -> Option<&'static ExpressionTemplate> {
    match expression_type {
        ExpressionType::BigLaugh => Some(&BIG_LAUGH),
        ExpressionType::Crying => Some(&CRYING),
        ExpressionType::Surprise => Some(&SURPRISE),
        ExpressionType::Anger => Some(&ANGER),
        ExpressionType::Neutral | ExpressionType::Other => None,
    }
}

/// Clamp a correction strength into [`CORRECTION_DENOISING_BAND`].
pub fn clamp_correction_denoising(strength: f64) -> f64 {
    let (low, high) = CORRECTION_DENOISING_BAND;
    if strength.is_finite() {
        strength.clamp(low, high)
    } else {
        TEMPLATE_DENOISING
    }
}
