//! Prompts for the vision collaborator: scene classification, artifact
//! detection and facial-expression analysis.

/// Templates for vision requests.
pub struct VisionPromptTemplate;

impl VisionPromptTemplate {
    pub fn classification_system() -> &'static str {
        r#"You are an image analyst specializing in scene classification and AI-generated image detection.
Never describe or infer the identity of any person in the image.
Return ONLY valid JSON, no other text."#
    }

    pub fn classification_prompt() -> &'static str {
        r#"Classify this image.

1. primary_scene - one of: portrait, landscape, interior, product, street, architecture, food, abstract, other
2. secondary_attributes - lighting conditions, composition, color palette, depth of field and other technical traits
3. ai_likelihood - probability between 0.0 and 1.0 that the image is AI-generated, judged from texture consistency, edge sharpness, lighting physics and typical generation artifacts

Return JSON in exactly this shape:
{
  "primary_scene": "<scene>",
  "secondary_attributes": ["<attribute>", "..."],
  "ai_likelihood": <float>
}"#
    }

    pub fn detection_system() -> &'static str {
        r#"You are an expert at detecting artifacts in AI-generated images.
Never describe or infer the identity of any person in the image.
Be specific about where each issue is and what it looks like.
Return ONLY valid JSON, no other text."#
    }

    pub fn detection_prompt() -> &'static str {
        r#"Inspect this image for signs of AI generation, grouped by dimension:

SKIN: plastic or overly smooth skin, missing pores, airbrushed complexion
LIGHTING: inconsistent light direction, missing or wrong shadows, impossible highlights
TEXTURE: over-uniform surfaces, missing micro variation, repetitive patterns
GEOMETRY: extra or missing fingers, distorted anatomy, impossible perspective, unnatural expression
COLOR: oversaturation, HDR look, inconsistent color temperature

Rate each issue "low" (barely noticeable), "medium" (noticeable on inspection) or "high" (obviously artificial).

Return JSON in exactly this shape:
{
  "fake_signals": [
    {"signal": "<description>", "severity": "low|medium|high", "dimension": "skin|lighting|texture|geometry|color"}
  ]
}
Use an empty array when nothing is found."#
    }

    pub fn expression_prompt() -> &'static str {
        r#"Analyze the facial expression in this image, if there is a face.

expression_type is one of: neutral, big_laugh, crying, surprise, anger, other.

Typical problems in generated faces:
- big_laugh: eyes not squinting, missing crow's feet, flat apple cheeks, shallow nasolabial folds, stiff mouth, no chin dimpling
- crying: no vertical frown lines between the brows, eye rims not red or swollen, nose tip not red, unnatural mouth corners, smooth chin
- surprise: no horizontal forehead lines, perfectly round eyes, overly regular mouth
- anger: shallow glabellar lines, nostrils not flared, relaxed jaw

Return JSON in exactly this shape:
{
  "has_face": true,
  "expression_type": "big_laugh",
  "expression_natural": false,
  "expression_issues": ["<issue>"],
  "muscle_problems": ["orbicularis_oculi_missing"]
}
Without a face, return has_face false and expression_type "neutral"."#
    }
}
