//! Prompts for the two generative-text calls
//!
//! The configuration call receives the exact placeholder document to fill
//! in; the content call receives a copywriting brief and the JSON shape
//! that [`crate::document::ContentPayload`] parses.

use crate::document::render_base_document;
use crate::types::{BusinessProfile, Palette};

const DEFAULT_SERVICE: &str = "Professional consulting services";
const DEFAULT_DESCRIPTION: &str = "Professional services business";
const DEFAULT_AUDIENCE: &str = "Business professionals";

pub fn system_prompt() -> &'static str {
    "You are an expert web developer and brand designer who builds personalized website \
configurations. Given business information and brand colors, you produce a complete \
configuration with compelling marketing copy, industry-appropriate content and features, \
SEO-optimized descriptions and keywords, realistic service and pricing structures, and \
testimonials.

Use the provided brand colors exactly as given. Keep all content professional and \
conversion-focused, and make the configuration complete and ready to use.

CRITICAL: Respond with ONLY valid JavaScript that can be saved directly as a .js file: \
a module exporting `export const clientConfig = {...};`. Do NOT wrap it in markdown code \
fences. Start with a comment or the export statement and end with the closing brace and \
semicolon."
}

pub fn content_system_prompt() -> &'static str {
    "You are a professional copywriter and marketing expert. Create compelling, \
industry-specific marketing content that converts visitors into customers. Always respond \
with valid JSON only, without markdown code blocks."
}

/// Bulleted service list, or the generic default when none were given
fn services_block(profile: &BusinessProfile) -> String {
    let services: Vec<String> = profile
        .services
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| format!("- {}", s))
        .collect();
    if services.is_empty() {
        format!("- {}", DEFAULT_SERVICE)
    } else {
        services.join("\n")
    }
}

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.trim().is_empty() {
        default
    } else {
        value
    }
}

pub fn config_prompt(profile: &BusinessProfile, palette: &Palette) -> String {
    format!(
        r#"Generate a complete website configuration for this business:

Business Information:
- Name: {name}
- Industry: {industry}
- Description: {description}
- Target Audience: {audience}
- Contact Email: {email}
- Contact Phone: {phone}
- Website Domain: {domain}

Services/Products:
{services}

Brand Colors:
- Primary: {primary}
- Secondary: {secondary}
- Accent: {accent}
- Neutral: {neutral}

CRITICAL: Follow this EXACT nested object structure. Do NOT use flat properties:

```javascript
{template}```

IMPORTANT PROPERTY ACCESS PATTERNS:
- Business name: clientConfig.business.name (NOT clientConfig.businessName)
- Brand colors: clientConfig.branding.colors.primary (NOT clientConfig.colors.primary)
- Hero content: clientConfig.content.hero.headline (NOT clientConfig.hero.headline)
- Contact info: clientConfig.contact.email (NOT clientConfig.email)

Generate the complete JavaScript configuration object following this EXACT structure."#,
        name = profile.business_name,
        industry = profile.industry,
        description = or_default(&profile.business_description, DEFAULT_DESCRIPTION),
        audience = or_default(&profile.target_audience, DEFAULT_AUDIENCE),
        email = profile.contact_email,
        phone = profile.contact_phone,
        domain = profile.website_domain,
        services = services_block(profile),
        primary = palette.primary,
        secondary = palette.secondary,
        accent = palette.accent,
        neutral = palette.neutral,
        template = render_base_document(profile, palette),
    )
}

pub fn content_prompt(profile: &BusinessProfile) -> String {
    format!(
        r#"Create compelling, conversion-focused content for this business:

BUSINESS PROFILE:
- Company: {name}
- Industry: {industry}
- Description: {description}
- Target Audience: {audience}
- Services/Products:
{services}

CONTENT REQUIREMENTS:

1. HERO SECTION:
   - A powerful, attention-grabbing headline (6-10 words)
   - A subheadline explaining the value proposition (15-25 words)
   - Two strong calls to action (primary and secondary)
   - Specific to the industry and services, not generic

2. FEATURES SECTION (4-6 features):
   - Each highlights a key business strength or service
   - Benefit-focused descriptions, using industry terminology where appropriate

3. SERVICES/PRICING (3 tiers):
   - Realistic packages based on the offerings, 4-6 features per tier
   - Pricing appropriate to the industry and market
   - Action-oriented, specific calls to action

4. TESTIMONIALS (4 testimonials):
   - Realistic and credible, with specific results
   - Believable names, job titles and companies

5. ABOUT SECTION:
   - A company story that builds trust
   - A mission statement that resonates with the target audience
   - 4 core business values

TONE & STYLE:
- Match the professional register of the industry
- Focus on benefits over features
- Conversion-focused but authentic

OUTPUT: Provide ONLY the content sections in this JSON structure:
{{
  "hero": {{
    "headline": "[Powerful headline]",
    "subheadline": "[Value proposition subheadline]",
    "cta": "[Primary CTA text]",
    "secondaryCta": "[Secondary CTA text]"
  }},
  "features": [
    {{"title": "[Feature name]", "description": "[Benefit-focused description]"}}
  ],
  "services": [
    {{
      "name": "[Service tier name]",
      "description": "[Service description]",
      "features": ["[Feature 1]", "[Feature 2]", "[Feature 3]", "[Feature 4]"],
      "price": "[Realistic pricing]",
      "cta": "[Specific CTA]"
    }}
  ],
  "testimonials": [
    {{
      "quote": "[Specific, results-focused testimonial]",
      "author": "[Realistic name]",
      "title": "[Job title]",
      "company": "[Company name]"
    }}
  ],
  "about": {{
    "story": "[Compelling company story]",
    "mission": "[Clear mission statement]",
    "values": ["[Value 1]", "[Value 2]", "[Value 3]", "[Value 4]"]
  }}
}}"#,
        name = profile.business_name,
        industry = profile.industry,
        description = or_default(&profile.business_description, DEFAULT_DESCRIPTION),
        audience = or_default(&profile.target_audience, DEFAULT_AUDIENCE),
        services = services_block(profile),
    )
}
