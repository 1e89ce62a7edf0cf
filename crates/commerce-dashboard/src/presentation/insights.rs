//! Hand-written narrative shown under each chart.
//!
//! The figures quoted here describe the full Sep 2016 - Oct 2018 dataset and
//! do not follow the controls.

use crate::types::Question;

const CUSTOMER_CITIES: &str = "\
São Paulo and Rio de Janeiro are the cities with the largest e-commerce market potential. \
Other cities such as Belo Horizonte and Brasília also matter, although they have fewer \
customers. A business expansion should focus its marketing on São Paulo and Rio de Janeiro \
first before reaching the remaining cities.";

const SELLER_CITIES: &str = "\
1. São Paulo has by far the most sellers, which suggests it is the main business hub of \
the platform.
2. Ibitinga, second place, has far fewer sellers than São Paulo. Below it, seller counts \
across the remaining cities are much more even.
3. Curitiba, Santo André, Belo Horizonte and Rio de Janeiro also host many sellers and are \
significant trading centres. Expansion or stronger marketing in these cities could raise \
transaction volume.";

const HOURLY_TREND: &str = "\
1. Transactions are very low between 01:00 and 06:00, when most customers are asleep or \
not shopping online.
2. Volume rises sharply after 06:00, with a clear jump around 08:00 - 10:00 as customers \
shop after waking up or before starting their day.
3. The peak falls between 11:00 and 16:00, highest around 12:00 - 14:00, which points to \
purchases made during lunch breaks.
4. Volume dips slightly after 16:00, likely while people commute home from work or school.
5. Activity stabilises again in the evening, with many customers still shopping between \
19:00 and 22:00.
6. After 22:00 transactions decline again as people begin to rest.";

const TOP_PRODUCTS: &str = "\
1. bed_bath_table appears twice among the most purchased products, showing strong demand \
for bedroom and bathroom goods.
2. furniture_decor takes second place, and garden_tools appears four times. Customers buy \
a lot for decorating their homes and for gardening.
3. computers_accessories shows that computer accessories still sell well, watches_gifts \
reflects demand for fashion and gifts, and health_beauty indicates that beauty and health \
products are also popular.";

const TOP_CATEGORIES: &str = "\
bed_bath_table dominates sales, followed by health_beauty and sports_leisure, reflecting \
strong interest in household, health and sports products. furniture_decor and \
computers_accessories also sell well, indicating steady demand for home decoration and \
technology. housewares, watches_gifts and telephony show growth potential. Promotions and \
bundles of best sellers, together with a focus on health and technology trends, are \
effective ways to grow sales.";

/// The static insight paragraph for a question.
pub fn insight(question: Question) -> &'static str {
    match question {
        Question::CustomerCities => CUSTOMER_CITIES,
        Question::SellerCities => SELLER_CITIES,
        Question::HourlyTrend => HOURLY_TREND,
        Question::TopProducts => TOP_PRODUCTS,
        Question::TopCategories => TOP_CATEGORIES,
    }
}
