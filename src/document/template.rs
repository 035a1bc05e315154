//! Placeholder client configuration
//!
//! Shown to the service as the exact structure to fill in, and used as the
//! base document when running offline.

use super::render::js_string;
use crate::types::{BusinessProfile, Palette};

pub fn render_base_document(profile: &BusinessProfile, palette: &Palette) -> String {
    let heading = profile.business_name.replace(['\n', '\r'], " ");

    format!(
        r#"// Client Configuration for {heading}
export const clientConfig = {{
  // Business Identity
  business: {{
    name: {name},
    legalName: "[Legal Business Name]",
    tagline: "[Compelling tagline]",
    shortDescription: "[Brief description for meta tags]",
    longDescription: "[Detailed company description]",
    yearFounded: 2020,
    industry: {industry},
    license: "[License if applicable]"
  }},

  // Contact Information
  contact: {{
    email: {email},
    phone: {phone},
    address: {{
      street: "[Street Address]",
      city: "[City]",
      state: "[State/Province]",
      country: "[Country]",
      zip: "[Postal Code]"
    }},
    hours: {{
      monday: "9:00 AM - 5:00 PM",
      tuesday: "9:00 AM - 5:00 PM",
      wednesday: "9:00 AM - 5:00 PM",
      thursday: "9:00 AM - 5:00 PM",
      friday: "9:00 AM - 5:00 PM",
      saturday: "Closed",
      sunday: "Closed"
    }},
    website: {website}
  }},

  // Social Media
  social: {{
    linkedin: "[linkedin-handle]",
    twitter: "[twitter-handle]",
    facebook: "[facebook-handle]",
    instagram: "[instagram-handle]"
  }},

  // Branding
  branding: {{
    logo: {{
      main: {logo},
      dark: "/images/logo-dark.svg",
      light: "/images/logo-light.svg"
    }},
    colors: {{
      primary: "{primary}",
      secondary: "{secondary}",
      accent: "{accent}",
      neutral: "{neutral}"
    }},
    fonts: {{
      heading: "[Heading Font]",
      body: "[Body Font]"
    }}
  }},

  // Content Sections
  content: {{
    hero: {{
      headline: "[Powerful headline]",
      subheadline: "[Supporting subheadline]",
      cta: "[Primary CTA]",
      secondaryCta: "[Secondary CTA]",
      image: "/images/hero.jpg"
    }},

    features: [
      {{
        title: "[Feature Title]",
        description: "[Feature Description]",
        icon: "[icon-name]",
        image: "/images/feature1.jpg"
      }}
      // ... more features
    ],

    services: [
      {{
        name: "[Service Name]",
        description: "[Service Description]",
        features: [
          "[Feature 1]",
          "[Feature 2]"
        ],
        price: "[Price]",
        cta: "[CTA Text]"
      }}
      // ... more services
    ],

    testimonials: [
      {{
        quote: "[Customer testimonial]",
        author: "[Author Name]",
        title: "[Author Title]",
        company: "[Company Name]"
      }}
      // ... more testimonials
    ],

    about: {{
      story: "[Company story]",
      mission: "[Mission statement]",
      values: ["[Value 1]", "[Value 2]"],
      team: [
        {{
          name: "[Team Member Name]",
          title: "[Title]",
          image: "/images/team/member.jpg"
        }}
      ]
    }}
  }},

  // SEO Configuration
  seo: {{
    title: "[SEO Title]",
    description: "[Meta description]",
    keywords: ["[keyword1]", "[keyword2]"],
    og: {{
      title: "[Open Graph Title]",
      description: "[OG Description]",
      image: "/images/og-image.jpg",
      url: {website}
    }}
  }}
}};
"#,
        heading = heading,
        name = js_string(&profile.business_name),
        industry = js_string(&profile.industry),
        email = js_string(&profile.contact_email),
        phone = js_string(&profile.contact_phone),
        website = js_string(&profile.website_domain),
        logo = js_string(profile.logo_path.as_deref().unwrap_or("/images/logo.svg")),
        primary = palette.primary,
        secondary = palette.secondary,
        accent = palette.accent,
        neutral = palette.neutral,
    )
}
