//! Data models module
//!
//! This module contains the client-visible shapes of every backend record

pub mod auth;
pub mod gallery;
pub mod lottery;
pub mod package;
pub mod user;
pub mod vip;

// Re-export commonly used models
pub use auth::{AuthUser, LoginRequest, LoginResponse};
pub use gallery::{GalleryItem, UpdateGalleryRequest};
pub use lottery::{Lottery, LotteryStatus, Participant, ParticipantStatus, StatusSnapshot, SpinResult, RoundSummary, UserStatusCounts, CreateLotteryRequest};
pub use package::{Package, CreatePackageRequest, UpdatePackageRequest, Pin, GeneratePinsRequest, PinStats, RechargePack, RechargePackRequest};
pub use user::{Registrant, RegistrationResult, PackageRef, UserCount};
pub use vip::{VipMember, Referral, CouponVerification, VipCredentials, VipSession, GeneratedReferral};
