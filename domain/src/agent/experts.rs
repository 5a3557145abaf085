//! The six correction experts.
//!
//! Experts are stateless. They decide whether they apply to an image and
//! turn an instruction into a report of what will be asked of the editor;
//! the pixel work itself happens in the editing collaborator.

use crate::agent::context::EnhancementContext;
use crate::agent::defaults::{default_instruction, expression_instruction};
use crate::agent::expression_templates::{clamp_correction_denoising, expression_template};
use crate::agent::instruction::AgentInstruction;
use crate::agent::kind::AgentKind;
use crate::core::error::DomainError;
use crate::core::scene::{is_landscape, is_portrait_like};
use crate::signal::expression::ExpressionMode;

/// What an expert decided to ask for.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentApplication {
    pub description: String,
    pub changes_applied: Vec<String>,
    /// The effective instruction, explicit or default
    pub instruction: AgentInstruction,
}

/// A correction expert for one defect category.
pub trait ExpertAgent: Send + Sync {
    fn kind(&self) -> AgentKind;

    /// Bilingual keyword vocabulary matched against signal descriptions.
    fn keywords(&self) -> &'static [&'static str];

    /// Human-readable name used in result descriptions.
    fn label(&self) -> &'static str;

    /// Scene eligibility rule.
    fn accepts_scene(&self, _scene: &str) -> bool {
        true
    }

    fn can_handle(&self, ctx: &EnhancementContext) -> bool {
        self.accepts_scene(&ctx.scene_type)
            && ctx.signals.iter().any(|s| s.matches_any(self.keywords()))
    }

    /// Resolve the effective instruction and describe it.
    ///
    /// Errors are agent faults: the orchestrator records them and moves on
    /// with the unmodified image.
    fn apply(&self, ctx: &EnhancementContext) -> Result<AgentApplication, DomainError> {
        let (instruction, explicit) = resolve_instruction(self.kind(), ctx)?;
        let description = if explicit {
            format!(
                "{} ({} strength) - target areas: {}",
                self.label(),
                instruction.intensity.label(),
                instruction.target_summary()
            )
        } else {
            format!("{} - default settings", self.label())
        };
        Ok(AgentApplication {
            description,
            changes_applied: instruction.specific_steps.clone(),
            instruction,
        })
    }
}

/// Explicit instruction from the context (validated), or the default.
fn resolve_instruction(
    kind: AgentKind,
    ctx: &EnhancementContext,
) -> Result<(AgentInstruction, bool), DomainError> {
    match &ctx.instruction {
        Some(instruction) => {
            if instruction.agent_kind != kind {
                return Err(DomainError::InstructionMismatch {
                    expected: instruction.agent_kind.to_string(),
                    actual: kind.to_string(),
                });
            }
            let strength = instruction.denoising_strength;
            if !strength.is_finite() || !(0.0..=1.0).contains(&strength) {
                return Err(DomainError::InvalidDenoising(strength));
            }
            Ok((instruction.clone(), true))
        }
        None => Ok((default_instruction(kind, &ctx.expression), false)),
    }
}

pub struct SkinAgent;

impl ExpertAgent for SkinAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Skin
    }

    fn keywords(&self) -> &'static [&'static str] {
        &[
            "skin", "皮肤", "smooth", "光滑", "plastic", "塑料", "pore", "毛孔", "waxy", "蜡",
            "texture", "纹理", "face", "脸", "airbrushed", "磨皮",
        ]
    }

    fn label(&self) -> &'static str {
        "Skin texture enhancement"
    }

    fn accepts_scene(&self, scene: &str) -> bool {
        is_portrait_like(scene)
    }
}

pub struct LightingAgent;

impl ExpertAgent for LightingAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Lighting
    }

    fn keywords(&self) -> &'static [&'static str] {
        &[
            "light", "光", "shadow", "阴影", "highlight", "高光", "reflection", "反射", "dark",
            "暗", "bright", "亮", "illuminat", "照明", "falloff", "衰减", "ambient", "环境光",
        ]
    }

    fn label(&self) -> &'static str {
        "Lighting correction"
    }
}

pub struct TextureAgent;

impl ExpertAgent for TextureAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Texture
    }

    fn keywords(&self) -> &'static [&'static str] {
        &[
            "texture", "纹理", "uniform", "均匀", "pattern", "图案", "detail", "细节", "surface",
            "表面", "material", "材质", "clean", "干净", "smooth", "平滑", "repetit", "重复",
            "micro", "微观", "grain", "颗粒",
        ]
    }

    fn label(&self) -> &'static str {
        "Texture detail enhancement"
    }
}

pub struct GeometryAgent;

impl ExpertAgent for GeometryAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Geometry
    }

    fn keywords(&self) -> &'static [&'static str] {
        &[
            "finger", "手指", "hand", "手", "pose", "姿势", "anatomy", "解剖", "proportion",
            "比例", "perspective", "透视", "distort", "扭曲", "limb", "肢体", "body", "身体",
            "face", "脸", "eye", "眼", "symmetr", "对称", "extra", "多余", "missing", "缺少",
            "impossible", "不可能",
        ]
    }

    fn label(&self) -> &'static str {
        "Geometry correction"
    }

    fn accepts_scene(&self, scene: &str) -> bool {
        !is_landscape(scene)
    }
}

pub struct ColorAgent;

impl ExpertAgent for ColorAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Color
    }

    fn keywords(&self) -> &'static [&'static str] {
        &[
            "color", "颜色", "saturat", "饱和", "hdr", "vibrant", "鲜艳", "tone", "色调",
            "gradient", "渐变", "temperature", "色温", "warm", "暖", "cool", "冷", "tint",
            "偏色", "contrast", "对比", "fade", "褪色", "vivid", "艳丽",
        ]
    }

    fn label(&self) -> &'static str {
        "Color correction"
    }
}

/// Fixes unnatural intense expressions muscle group by muscle group.
///
/// Runs whenever the expression needs correcting, or when a signal names an
/// expression problem while the expression itself is being preserved.
pub struct ExpressionAgent;

impl ExpertAgent for ExpressionAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Expression
    }

    fn keywords(&self) -> &'static [&'static str] {
        &[
            "laugh", "笑", "smile", "微笑", "grin", "teeth", "牙", "crow's feet", "鱼尾纹",
            "cheek", "脸颊", "苹果肌", "cry", "哭", "tear", "泪", "sad", "悲", "frown", "皱眉",
            "sob", "surprise", "惊", "shock", "震惊", "wide eyes", "anger", "怒", "fury",
            "glare", "瞪", "expression", "表情", "stiff", "僵硬", "unnatural", "不自然",
            "muscle", "肌肉", "asymmetr", "对称", "fake", "假",
        ]
    }

    fn label(&self) -> &'static str {
        "Expression muscle correction"
    }

    fn accepts_scene(&self, scene: &str) -> bool {
        is_portrait_like(scene)
    }

    fn can_handle(&self, ctx: &EnhancementContext) -> bool {
        self.accepts_scene(&ctx.scene_type)
            && (ctx.expression_mode().is_correct()
                || ctx.signals.iter().any(|s| s.matches_any(self.keywords())))
    }

    fn apply(&self, ctx: &EnhancementContext) -> Result<AgentApplication, DomainError> {
        let (mut instruction, explicit) = resolve_instruction(self.kind(), ctx)?;
        let correcting = instruction.expression_mode == ExpressionMode::Correct;
        if correcting {
            instruction.denoising_strength =
                clamp_correction_denoising(instruction.denoising_strength);
        }

        let expression_type = ctx.expression.expression_type;
        let description = if explicit {
            format!(
                "{} ({} strength) - expression: {}, mode: {}",
                self.label(),
                instruction.intensity.label(),
                expression_type.label(),
                instruction.expression_mode
            )
        } else if correcting && expression_template(expression_type).is_some() {
            format!("{} - {} template", self.label(), expression_type.label())
        } else if correcting {
            "Expression refinement - generic settings".to_string()
        } else {
            "Expression refinement - default settings".to_string()
        };

        let mut changes_applied = instruction.specific_steps.clone();
        if changes_applied.is_empty() {
            changes_applied = expression_instruction(&ctx.expression).specific_steps;
        }

        Ok(AgentApplication {
            description,
            changes_applied,
            instruction,
        })
    }
}
