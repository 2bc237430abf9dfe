#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectCategory {
    LandingPage,
    WebSite,
    ECommerce,
}

impl ProjectCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::LandingPage => "Landing Page",
            Self::WebSite => "Web Site",
            Self::ECommerce => "E-Commerce",
        }
    }
}

pub struct Project {
    pub id: u32,
    pub title: &'static str,
    pub category: ProjectCategory,
    pub description: &'static str,
    pub tags: &'static [&'static str],
}

pub const PROJECTS: &[Project] = &[
    Project {
        id: 1,
        title: "FinTech Dashboard",
        category: ProjectCategory::WebSite,
        description: "Plataforma integral para gestión de activos digitales con interfaz minimalista y actualizaciones en tiempo real.",
        tags: &["React", "Tailwind", "Data Viz"],
    },
    Project {
        id: 2,
        title: "Neon Energy Drink",
        category: ProjectCategory::LandingPage,
        description: "Landing page de alta conversión para lanzamiento de producto, enfocada en animaciones de scroll.",
        tags: &["GSAP", "Conversion", "Dark Mode"],
    },
    Project {
        id: 3,
        title: "Arkiteqtura Studio",
        category: ProjectCategory::WebSite,
        description: "Portfolio inmersivo para estudio de arquitectura, destacando fotografía y tipografía editorial.",
        tags: &["Minimal", "UX/UI", "Gallery"],
    },
    Project {
        id: 4,
        title: "Crypto Exchange LP",
        category: ProjectCategory::LandingPage,
        description: "Página de aterrizaje optimizada para captación de leads en el sector Web3.",
        tags: &["Web3", "Growth", "Form Validation"],
    },
];

pub const CONTACT_EMAIL: &str = "hello@kngrowth.com";
pub const BRAND_NAME: &str = "KN GROWTH";
