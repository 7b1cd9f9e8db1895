// Page behaviour tuning shared by the core logic and the web front-end.

// Visibility thresholds (fraction of the element area in the viewport)
pub const GALLERY_VISIBLE_RATIO: f64 = 0.3;
pub const AMBIENT_VISIBLE_RATIO: f64 = 0.3;
pub const REVEAL_VISIBLE_RATIO: f64 = 0.1;

// Scrolling
pub const NAVBAR_SCROLLED_AFTER_PX: f64 = 100.0; // navbar gets `scrolled` past this
pub const SECTION_ACTIVATION_OFFSET_PX: f64 = 100.0; // sections activate this much early
pub const HEADER_OFFSET_PX: f64 = 80.0; // fixed header height for anchor jumps
pub const STAGGER_STEP_SEC: f64 = 0.1; // per-child transition delay in grids

// Preloader timings (milliseconds)
pub const PRELOAD_FALLBACK_MS: i32 = 5000; // give up waiting on slow images
pub const PRELOAD_HOLD_FULL_MS: i32 = 300; // keep 100% on screen briefly
pub const PRELOAD_REMOVE_AFTER_MS: i32 = 500; // matches the CSS fade-out

pub const CRITICAL_IMAGES: [&str; 2] = ["assets/logo.jpg", "assets/logo-remove.png"];

// Element ids
pub const PRELOADER_ID: &str = "preloader";
pub const PRELOADER_BAR_ID: &str = "preloader-bar";
pub const PRELOADER_PERCENTAGE_ID: &str = "preloader-percentage";
pub const FEATURED_VIDEO_ID: &str = "featured-video";
pub const FEATURED_CONTROL_ID: &str = "play-featured-video";
pub const MAIN_VIDEO_ID: &str = "main-about-video";
pub const MAIN_CONTROL_ID: &str = "play-main-video";

// Selectors
pub const GALLERY_VIDEO_SELECTOR: &str = ".gallery-video";
pub const AMBIENT_VIDEO_SELECTOR: &str = "video:not(.gallery-video)";
pub const REVEAL_SELECTOR: &str = ".section-header, .about-text, .about-video, .feature, \
.menu-item, .cocktail-video, .cocktail-info, .event-card, \
.contact-info, .map-container, .reservation-content";
pub const STAGGER_GRID_SELECTOR: &str = ".menu-grid, .events-grid, .about-features";

// Presentation classes
pub const CLASS_HIDDEN: &str = "hidden";
pub const CLASS_ACTIVE: &str = "active";
pub const CLASS_SCROLLED: &str = "scrolled";
pub const CLASS_VISIBLE: &str = "visible";
pub const CLASS_LOADED: &str = "loaded";
pub const CLASS_ANIMATE: &str = "animate-on-scroll";
