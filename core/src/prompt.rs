// Prompt construction for outfit generation and editing

use crate::models::{
    EditAction, EditOutfitRequest, GeneratedOutfit, OutfitRequest, PromptPart, Wardrobe,
};

const PRIOR_OUTFITS_LABEL: &str =
    "\n**Previously Generated Outfits (for reference, do not copy):**";

const OUTPUT_RULES: &str = "
--- Final Image Output ---

*   Generate a single, full-body image of a female figure in a neutral standing pose.
*   The background must be clean and simple (e.g., light gray studio background) to keep the focus on the outfit.
*   The output must be a single, photorealistic image with no text.

--- User's Wardrobe for this Task ---";

const PRESERVE_MODEL: &str = "    *   **Model:** The model's body, pose, face, proportions, and skin tone must remain unchanged.";

const PRESERVE_BACKGROUND: &str = "    *   **Background & Lighting:** The background and overall lighting conditions must be identical.";

const REALISM: &str = "**Realism:** The final image must be photorealistic and look like a natural, seamless photograph. Avoid \"AI-art\" textures.";

/// Build the prompt for one generation attempt.
///
/// `prior_outfits` holds every outfit the model must not repeat: the ones
/// the caller already has plus those produced earlier in the same batch.
/// Selected components with no items are skipped; validation rejects them
/// before this point.
pub fn build_generation_prompt(
    request: &OutfitRequest,
    wardrobe: &Wardrobe,
    prior_outfits: &[&GeneratedOutfit],
    attempt_index: usize,
) -> Vec<PromptPart> {
    let mut parts = vec![PromptPart::Text(generation_preamble(
        attempt_index,
        !prior_outfits.is_empty(),
    ))];

    if !prior_outfits.is_empty() {
        parts.push(PromptPart::text(PRIOR_OUTFITS_LABEL));
        parts.extend(
            prior_outfits
                .iter()
                .map(|outfit| PromptPart::Image(outfit.image.clone())),
        );
    }

    parts.push(PromptPart::Text(styling_rules(request)));

    for category in &request.components {
        let items = wardrobe.items(*category);
        if items.is_empty() {
            continue;
        }
        parts.push(PromptPart::Text(format!("\n**Available {}:**", category)));
        parts.extend(items.iter().map(|item| PromptPart::Image(item.image.clone())));
    }

    parts
}

fn generation_preamble(attempt_index: usize, has_prior_outfits: bool) -> String {
    let mut text = format!(
        "You are an AI Outfit Stylist. Your mission is to create realistic, stylish, and coherent outfit recommendations based on professional styling principles and the user's actual wardrobe photos.

--- Generation Logic & Constraints ---

1.  **Use Identical Visuals (CRITICAL):**
    *   You MUST use the identical visual references from the wardrobe images provided. This means the **same shape, pattern, and texture.**
    *   **DO NOT REDESIGN OR ALTER** the clothing items. Your job is to composite the existing items realistically onto a model, not to invent new ones. The final image must look like a real photo of the user's clothes.

2.  **Unique & Varied Options:**
    *   For this specific request (Option #{}), create a combination that is unique. **AVOID REPETITION.** Do not use the same core combination of items that you have used for other options in this session.",
        attempt_index + 1
    );

    if has_prior_outfits {
        text.push_str("\n    *   **IMPORTANT**: You have already generated some outfits. Here they are. DO NOT generate these exact combinations again. You must create something new.");
    }

    text
}

fn styling_rules(request: &OutfitRequest) -> String {
    format!(
        "
--- Professional Styling Principles (CRITICAL) ---

You must adhere to the following rules to ensure the generated outfits are fashionable and well-put-together. The user has selected the style preset: \"{preset}\". This preset should strongly guide your choices.

*   **Palette Discipline:** Stick to a maximum of 3 colors per outfit. Apply the 60-30-10 rule where possible (60% dominant color, 30% secondary, 10% accent). The user's preferred color tone is \"{tone}\". This is a hint, but the preset and harmony rules are more important.
*   **Color Harmony:** Prioritize harmonious color palettes:
    *   **Neutral + Accent:** Combine neutral colors (like white, beige, gray, navy, black) with one pop of color.
    *   **Analogous:** Use colors that are next to each other on the color wheel.
    *   **Soft Complementary:** Use colors opposite each other on the color wheel, but in softer, less saturated tones.
    *   Avoid clashing combinations like bright red with bright green.
*   **Silhouette Balance:** Create a visually balanced silhouette by pairing fitted items with relaxed/wider items. For example:
    *   Fitted top with wide-leg pants.
    *   Relaxed blouse with skinny jeans or a pencil skirt.
    *   **CRITICAL:** Avoid pairing two oversized or very bulky items together.
*   **Pattern & Texture Sanity:**
    *   **Max One Pattern:** Use a maximum of one patterned piece per outfit. All other pieces should be solid colors.
    *   If a patterned hijab is used, the top and bottom must be solid.
    *   You can mix textures (e.g., denim and a knit sweater), but avoid overwhelming combinations.
*   **Layering Logic:** Layers must be logical. Inner layers should be lighter/thinner than outer layers (e.g., a t-shirt under a jacket).
*   **Accessory Coherence:** Ensure all metallic accessories (jewelry, bag hardware, etc.) are a consistent color (e.g., all gold-toned or all silver-toned).
*   **Modest Wear Specifics (If Hijab is selected):** The hijab's color should anchor to the dominant or secondary color of the outfit for a cohesive look.
{output}",
        preset = request.style_preset,
        tone = request.color_tone,
        output = OUTPUT_RULES,
    )
}

/// Build the prompt for a single-layer edit of `base_outfit`.
///
/// Image parts: the base outfit, then (for `change` only) the replacement item.
pub fn build_edit_prompt(base_outfit: &GeneratedOutfit, edit: &EditOutfitRequest) -> Vec<PromptPart> {
    let mut parts = vec![
        PromptPart::Text(edit_instructions(edit)),
        PromptPart::Image(base_outfit.image.clone()),
    ];

    if let (EditAction::Change, Some(item)) = (edit.action, &edit.replacement_item) {
        parts.push(PromptPart::Text(format!(
            "\n**Replacement Item (New {}):**",
            edit.category
        )));
        parts.push(PromptPart::Image(item.image.clone()));
    }

    parts
}

fn edit_instructions(edit: &EditOutfitRequest) -> String {
    let target = edit.target_description();

    match edit.action {
        EditAction::Change => format!(
            "You are an AI Fashion Image Editor. Your task is to replace a specific clothing layer in a base image with a new item from the user's wardrobe, while keeping all other visual elements identical. After the replacement, ensure the resulting outfit remains stylistically coherent and visually appealing, following principles of color harmony and silhouette balance.

--- CRITICAL CONSTRAINTS ---

1.  **Targeted Replacement:** You MUST replace **{target}** in the \"Base Image to Edit\" with the item shown in the \"Replacement Item\" image.
2.  **Preserve Everything Else:** You MUST preserve all other elements from the original \"Base Image to Edit\":
{model}
    *   **Unchanged Clothing:** Any clothing item or layer that is NOT the target must be identical in shape, fabric, texture, color, and lighting.
{background}
3.  **Use Wardrobe Item Exactly:** The new {category} in the output image must look exactly like the \"Replacement Item\" provided (same shape, color, pattern, texture). Do not alter or redesign it.
4.  {realism}

--- IMAGES ---

**Base Image to Edit:**",
            target = target,
            model = PRESERVE_MODEL,
            background = PRESERVE_BACKGROUND,
            category = edit.category,
            realism = REALISM,
        ),
        EditAction::TakeOut => format!(
            "You are an AI Fashion Image Editor. Your task is to remove a specific clothing layer from a base image, while keeping all other visual elements identical. After the removal, ensure the resulting outfit remains stylistically coherent and visually appealing, for example by ensuring the newly revealed layer underneath works well with the rest of the outfit.

--- CRITICAL CONSTRAINTS ---

1.  **Targeted Removal:** You MUST remove **{target}** from the \"Base Image to Edit\".
2.  **Natural Fill:** You MUST fill the area where the item was removed naturally, creating realistic contours and shading on the layer that would be underneath.
3.  **Preserve Everything Else:** You MUST preserve all other elements from the original \"Base Image to Edit\":
{model}
    *   **Unchanged Clothing:** All other clothing items and layers must be identical in shape, fabric, texture, color, and lighting.
{background}
4.  {realism}

--- IMAGE ---

**Base Image to Edit:**",
            target = target,
            model = PRESERVE_MODEL,
            background = PRESERVE_BACKGROUND,
            realism = REALISM,
        ),
    }
}
