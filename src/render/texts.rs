//! User-facing strings
//!
//! Tenants are Arabic-speaking restaurants, so every message and button label
//! lives here in one place. Reply-keyboard labels double as inbound triggers.

// Menu defaults
pub const MAIN_CATEGORY_NAME: &str = "قائمة الطعام";
pub const DEFAULT_CATEGORY_NAME: &str = "قسم بدون اسم";
pub const DEFAULT_ITEM_NAME: &str = "صنف بدون اسم";
pub const DEFAULT_RESTAURANT_NAME: &str = "المطعم";
pub const MENU_NOT_CONFIGURED_NAME: &str = "المنيو قيد الإعداد";
pub const MENU_NOT_CONFIGURED_NOTE: &str =
    "لم يقم المطعم بإعداد المنيو بعد، يرجى المحاولة لاحقاً.";

/// Marker word in free-text menus meaning "ask for a quote"
pub const QUOTE_MARKER: &str = "حسب";
pub const PRICE_ON_REQUEST: &str = "حسب الطلب";
pub const PRICE_ON_REQUEST_NOTE: &str = "السعر حسب الطلب.";

// Reply keyboard
pub const BUTTON_SHOW_MENU: &str = "🧾 عرض المنيو";
pub const BUTTON_SHOW_CART: &str = "🛒 عرض السلة";
pub const BUTTON_CLEAR_CART: &str = "❌ إفراغ السلة";

// Inline keyboards
pub const BUTTON_BACK_MAIN: &str = "🔙 رجوع للقائمة الرئيسية";
pub const BUTTON_BACK_CATEGORIES: &str = "🔙 رجوع للأقسام";
pub const BUTTON_ADD_TO_CART: &str = "➕ أضف للسلة";
pub const BUTTON_CONFIRM_ORDER: &str = "✅ تأكيد الطلب";
pub const BUTTON_KEEP_BROWSING: &str = "🔙 متابعة التصفح";

// Tenant resolution
pub const INVALID_LINK: &str = "❌ هذا الرابط غير صالح.\nالرجاء طلب الرابط الصحيح من صاحب المطعم.";
pub const USE_OFFICIAL_LINK: &str =
    "❌ هذا الرابط غير صالح.\nالرجاء استخدام الرابط الرسمي الخاص بالمطعم.";
pub const NO_TENANT_BOUND: &str = "❌ يرجى الدخول عبر رابط المطعم.";
pub const CONFIG_UNAVAILABLE: &str = "⚠ تعذر تحميل إعدادات المطعم، يرجى المحاولة لاحقاً.";

// Browsing
pub const CHOOSE_CATEGORY: &str = "اختر القسم الذي تريد استعراضه من المنيو:";
pub const CATEGORY_NOT_FOUND: &str = "⚠ لم يتم العثور على هذا القسم.";
pub const ITEM_NOT_FOUND: &str = "⚠ لم يتم العثور على هذا الصنف.";
pub const CATEGORY_EMPTY: &str = "لا توجد أصناف في هذا القسم حالياً.";
pub const AFTER_ITEMS: &str = "أضف ما تريد إلى السلة، أو ارجع لباقي الأقسام 👇";
pub const BACK_TO_MAIN: &str = "رجعناك للقائمة الرئيسية 👇";
pub const USE_BUTTONS: &str = "يمكنك استخدام الأزرار بالأسفل للتعامل مع المنيو والسلة 👇";

// Cart
pub const CART_EMPTY: &str = "السلة فارغة حالياً.";
pub const CART_HEADER: &str = "🛒 <b>سلتك الحالية:</b>";
pub const CART_CLEARED: &str = "✅ تم إفراغ السلة.";
pub const CART_EMPTY_AT_CHECKOUT: &str = "السلة فارغة، أضف بعض الطلبات أولاً.";
pub const TOTAL_LABEL: &str = "الإجمالي التقريبي";

// Checkout
pub const ASK_NAME: &str = "🧾 رائع! قبل تأكيد الطلب، اكتب اسمك الكامل:";
pub const ASK_PHONE: &str = "📞 ممتاز، الآن اكتب رقم الجوال للتواصل معك:";
pub const ASK_ADDRESS: &str = "📍 اكتب العنوان أو أقرب نقطة دلالة (والتعليمات الخاصة إن وجدت):";
pub const ORDER_RECEIVED: &str = "✅ تم استلام بيانات الطلب:";
pub const LABEL_NAME: &str = "👤 الاسم";
pub const LABEL_PHONE: &str = "📞 الجوال";
pub const LABEL_ADDRESS: &str = "📍 العنوان";

// Welcome
pub const USE_BUTTONS_BELOW: &str = "استخدم الأزرار بالأسفل لعرض المنيو 👇";
pub const LABEL_OPENING_HOURS: &str = "⏰ ساعات العمل";
pub const LABEL_DELIVERY: &str = "🚚 التوصيل";
pub const LABEL_CONTACT: &str = "☎️ للتواصل";
pub const WELCOME_INTRO: &str = "👋 أهلاً بك في";
pub const WELCOME_BACK: &str = "مرحباً من جديد! 👋\nأنت تتحدث مع";
pub const CATEGORY_ICON: &str = "📂";

/// Added-to-cart confirmation, wrapped around the item name
pub const ADDED_TO_CART_PREFIX: &str = "✅ تمت إضافة";
pub const ADDED_TO_CART_SUFFIX: &str = "إلى السلة.";

/// Closing line of the order summary, followed by the restaurant name
pub const THANK_YOU: &str = "سيتم التواصل معك قريباً لتأكيد الطلب، شكراً لاختيارك";
